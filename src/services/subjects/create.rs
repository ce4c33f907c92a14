use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubjectService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};

pub async fn create_subject(
    service: &SubjectService,
    subject_data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if subject_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "课题名称不能为空",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_subject(teacher_id, subject_data).await {
        Ok(subject) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(subject, "课题创建成功")))
        }
        Err(e) => {
            error!("Failed to create subject: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::SubjectCreationFailed,
                format!("Failed to create subject: {e}"),
            )))
        }
    }
}
