use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_questions(
    service: &QuestionService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 课题必须存在，读取不做归属限制
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => {}
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

    match storage.list_questions(subject_id).await {
        Ok(questions) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(questions, "获取题目列表成功")))
        }
        Err(e) => {
            error!("Failed to list questions of subject {}: {}", subject_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list questions: {e}"),
                )),
            )
        }
    }
}
