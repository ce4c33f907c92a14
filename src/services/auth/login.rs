use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名获取用户信息
    match storage.get_user_by_username(&login_request.username).await {
        Ok(Some(user)) => {
            // 2. 验证密码
            if verify_password(&login_request.password, &user.password_hash) {
                // 3. 签发令牌
                match JwtUtils::generate_token(
                    user.id,
                    &user.username,
                    &user.role.to_string(),
                    &user.name,
                ) {
                    Ok(token) => {
                        tracing::info!("User {} logged in successfully", user.username);

                        Ok(HttpResponse::Ok().json(ApiResponse::success(
                            LoginResponse { token, user },
                            "Login successful",
                        )))
                    }
                    Err(e) => {
                        tracing::error!("Failed to generate JWT token: {}", e);
                        Ok(
                            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                "Login failed, unable to generate token",
                            )),
                        )
                    }
                }
            } else {
                Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::AuthFailed,
                    "Username or password is incorrect",
                )))
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::Storage;
    use crate::utils::password::hash_password;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    async fn service_with_user(username: &str, password: &str) -> AuthService {
        let storage = SeaOrmStorage::new_with_url("sqlite::memory:")
            .await
            .expect("in-memory storage should initialize");

        let hash = hash_password(password).unwrap();
        storage
            .create_user_impl(
                CreateUserRequest {
                    username: username.to_string(),
                    password: None,
                    role: UserRole::Teacher,
                    name: "测试教师".to_string(),
                    email: None,
                    class_id: None,
                },
                &hash,
            )
            .await
            .unwrap();

        let storage: Arc<dyn Storage> = Arc::new(storage);
        AuthService {
            storage: Some(storage),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let service = service_with_user("t001", "secret").await;
        let req = TestRequest::default().to_http_request();

        let resp = handle_login(
            &service,
            LoginRequest {
                username: "t001".to_string(),
                password: "secret".to_string(),
            },
            &req,
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = service_with_user("t001", "secret").await;
        let req = TestRequest::default().to_http_request();

        let resp = handle_login(
            &service,
            LoginRequest {
                username: "t001".to_string(),
                password: "wrong".to_string(),
            },
            &req,
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let service = service_with_user("t001", "secret").await;
        let req = TestRequest::default().to_http_request();

        let resp = handle_login(
            &service,
            LoginRequest {
                username: "nobody".to_string(),
                password: "secret".to_string(),
            },
            &req,
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
