use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SystemService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, system::responses::StatsResponse};

pub async fn get_stats(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let classes = match storage.count_classes().await {
        Ok(n) => n,
        Err(e) => return Ok(stats_error(e)),
    };
    let teachers = match storage.count_users_by_role(&UserRole::Teacher).await {
        Ok(n) => n,
        Err(e) => return Ok(stats_error(e)),
    };
    let students = match storage.count_users_by_role(&UserRole::Student).await {
        Ok(n) => n,
        Err(e) => return Ok(stats_error(e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StatsResponse {
            classes,
            teachers,
            students,
        },
        "获取统计数据成功",
    )))
}

fn stats_error(e: crate::errors::WenjuanError) -> HttpResponse {
    error!("Failed to collect stats: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Failed to collect stats: {e}"),
    ))
}
