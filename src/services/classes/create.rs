use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};

pub async fn create_class(
    service: &ClassService,
    class_data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if class_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "班级名称不能为空",
        )));
    }

    let storage = service.get_storage(request);

    // 指派教师时校验目标用户存在
    if let Some(teacher_id) = class_data.teacher_id {
        match storage.get_user_by_id(teacher_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "指定的教师不存在",
                )));
            }
            Err(e) => {
                error!("Failed to verify teacher {}: {}", teacher_id, e);
                return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to verify teacher: {e}"),
                )));
            }
        }
    }

    match storage.create_class(class_data).await {
        Ok(class) => Ok(HttpResponse::Created().json(ApiResponse::success(class, "班级创建成功"))),
        Err(e) => {
            error!("Failed to create class: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ClassCreationFailed,
                format!("Failed to create class: {e}"),
            )))
        }
    }
}
