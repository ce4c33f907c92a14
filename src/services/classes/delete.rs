use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_class(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 删除是幂等操作；存储层会同时解除学生的班级归属
    match storage.delete_class(class_id).await {
        Ok(deleted) => {
            if deleted {
                info!("Class {} deleted", class_id);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("班级删除成功")))
        }
        Err(e) => {
            error!("Failed to delete class {}: {}", class_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ClassDeleteFailed,
                format!("Failed to delete class: {e}"),
            )))
        }
    }
}
