use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubjectService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let storage = service.get_storage(request);

    // 归属校验；目标不存在时按幂等删除处理
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => {
            if subject.teacher_id != teacher_id {
                info!(
                    "Teacher {} attempted to delete subject {} owned by {}",
                    teacher_id, subject_id, subject.teacher_id
                );
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SubjectPermissionDenied,
                    "无权操作该课题",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::Ok().json(ApiResponse::success_empty("课题删除成功")));
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

    // 存储层会在同一事务中清空题库
    match storage.delete_subject(subject_id).await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("课题删除成功"))),
        Err(e) => {
            error!("Failed to delete subject {}: {}", subject_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::SubjectDeleteFailed,
                format!("Failed to delete subject: {e}"),
            )))
        }
    }
}
