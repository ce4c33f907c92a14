use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubjectService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let storage = service.get_storage(request);

    // 归属校验：只有课题创建者能修改
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => {
            if subject.teacher_id != teacher_id {
                info!(
                    "Teacher {} attempted to update subject {} owned by {}",
                    teacher_id, subject_id, subject.teacher_id
                );
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SubjectPermissionDenied,
                    "无权操作该课题",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "课题不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get subject {}: {}", subject_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get subject: {e}"),
                )),
            );
        }
    }

    match storage.update_subject(subject_id, update_data).await {
        Ok(Some(subject)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "课题更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "课题不存在",
        ))),
        Err(e) => {
            error!("Failed to update subject {}: {}", subject_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::SubjectUpdateFailed,
                format!("Failed to update subject: {e}"),
            )))
        }
    }
}
