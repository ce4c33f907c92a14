use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, classes::requests::ClassListQuery};

pub async fn list_classes(
    service: &ClassService,
    query: ClassListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取班级列表成功"))),
        Err(e) => {
            error!("Failed to list classes: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list classes: {e}"),
                )),
            )
        }
    }
}

// 教师端：固定按当前登录教师过滤
pub async fn list_own_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let query = ClassListQuery {
        teacher_id: Some(teacher_id),
    };

    list_classes(service, query, request).await
}
