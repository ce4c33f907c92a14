use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{QuestionService, SubjectAccess};
use crate::models::questions::entities::QuestionType;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_question(
    service: &QuestionService,
    subject_id: i64,
    question_data: CreateQuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 只有课题归属教师能编辑题库
    if let SubjectAccess::Denied(resp) = service.check_subject_ownership(subject_id, request).await
    {
        return Ok(resp);
    }

    if question_data.text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "题目内容不能为空",
        )));
    }

    // 选项归一化为 JSON 文本落库
    let options_json = match question_data.options.as_ref().map(|o| o.normalize()) {
        Some(Ok(json)) => json,
        Some(Err(e)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("选项格式错误: {e}"),
            )));
        }
        None => None,
    };

    // 选择类题目必须有选项
    if matches!(
        question_data.question_type,
        QuestionType::Single | QuestionType::Multi
    ) && options_json.is_none()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "选择类题目必须提供选项",
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .create_question(
            subject_id,
            question_data.text.trim(),
            question_data.question_type,
            options_json,
        )
        .await
    {
        Ok(question) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(question, "题目创建成功")))
        }
        Err(e) => {
            error!("Failed to create question in subject {}: {}", subject_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::QuestionCreationFailed,
                format!("Failed to create question: {e}"),
            )))
        }
    }
}
