use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 删除是幂等操作，目标不存在同样视为成功
    match storage.delete_user(user_id).await {
        Ok(deleted) => {
            if deleted {
                info!("User {} deleted", user_id);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("用户删除成功")))
        }
        Err(e) => {
            error!("Failed to delete user {}: {}", user_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserDeleteFailed,
                format!("Failed to delete user: {e}"),
            )))
        }
    }
}
