use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::common::{ApiResponse, ErrorCode};

/// 路径参数 `{id}` 的安全提取器
///
/// 解析失败时返回统一响应格式的 400，而不是 actix 默认的纯文本错误。
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("id") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) if id > 0 => Ok(SafeIDI64(id)),
                _ => Err(format!("无效的ID参数: {raw}")),
            },
            None => Err("缺少ID参数".to_string()),
        };

        ready(result.map_err(|msg| {
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg.clone()));
            InternalError::from_response(msg, response).into()
        }))
    }
}
