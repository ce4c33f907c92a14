use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{QuestionService, SubjectAccess};
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_question(
    service: &QuestionService,
    question_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先定位题目，再通过其课题校验归属
    let question = match storage.get_question_by_id(question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            // 幂等删除：目标不存在视为成功
            return Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目删除成功")));
        }
        Err(e) => {
            error!("Failed to get question {}: {}", question_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get question: {e}"),
                )),
            );
        }
    };

    if let SubjectAccess::Denied(resp) = service
        .check_subject_ownership(question.subject_id, request)
        .await
    {
        return Ok(resp);
    }

    match storage.delete_question(question_id).await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目删除成功"))),
        Err(e) => {
            error!("Failed to delete question {}: {}", question_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::QuestionDeleteFailed,
                format!("Failed to delete question: {e}"),
            )))
        }
    }
}
