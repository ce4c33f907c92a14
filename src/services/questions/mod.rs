pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

// 课题归属校验结果：找不到/无权限时直接给出响应
pub(crate) enum SubjectAccess {
    Owned,
    Denied(HttpResponse),
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 校验课题存在且归属当前教师
    pub(crate) async fn check_subject_ownership(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> SubjectAccess {
        let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
            return SubjectAccess::Denied(HttpResponse::Unauthorized().json(
                ApiResponse::error_empty(ErrorCode::Unauthorized, "Authentication required"),
            ));
        };

        let storage = self.get_storage(request);

        match storage.get_subject_by_id(subject_id).await {
            Ok(Some(subject)) => {
                if subject.teacher_id == teacher_id {
                    SubjectAccess::Owned
                } else {
                    SubjectAccess::Denied(HttpResponse::Forbidden().json(
                        ApiResponse::error_empty(
                            ErrorCode::SubjectPermissionDenied,
                            "无权操作该课题",
                        ),
                    ))
                }
            }
            Ok(None) => SubjectAccess::Denied(HttpResponse::NotFound().json(
                ApiResponse::error_empty(ErrorCode::SubjectNotFound, "课题不存在"),
            )),
            Err(e) => SubjectAccess::Denied(HttpResponse::InternalServerError().json(
                ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get subject: {e}"),
                ),
            )),
        }
    }

    // 获取课题下的题目列表
    pub async fn list_questions(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, subject_id, request).await
    }

    // 向课题添加题目
    pub async fn create_question(
        &self,
        subject_id: i64,
        question_data: CreateQuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, subject_id, question_data, request).await
    }

    // 删除题目
    pub async fn delete_question(
        &self,
        question_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, question_id, request).await
    }
}
