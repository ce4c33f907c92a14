use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateStudentRequest, CreateUserRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_username};

pub async fn list_students(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 班级不存在与空名单要区分开
    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "班级不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get class {}: {}", class_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class: {e}"),
                )),
            );
        }
    }

    match storage.list_class_students(class_id).await {
        Ok(students) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(students, "获取班级学生成功")))
        }
        Err(e) => {
            error!("Failed to list students of class {}: {}", class_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list students: {e}"),
                )),
            )
        }
    }
}

// 教师端：只能查看自己名下班级的学生名单
pub async fn list_students_owned(
    service: &ClassService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => {
            if class.teacher_id != Some(teacher_id) {
                info!(
                    "Teacher {} attempted to view roster of class {} (owner: {:?})",
                    teacher_id, class_id, class.teacher_id
                );
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "无权查看该班级",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "班级不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get class {}: {}", class_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class: {e}"),
                )),
            );
        }
    }

    match storage.list_class_students(class_id).await {
        Ok(students) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(students, "获取班级学生成功")))
        }
        Err(e) => {
            error!("Failed to list students of class {}: {}", class_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list students: {e}"),
                )),
            )
        }
    }
}

// 管理端：向班级添加单个学生
pub async fn create_student(
    service: &ClassService,
    class_id: i64,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&student_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Some(ref email) = student_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "班级不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get class {}: {}", class_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class: {e}"),
                )),
            );
        }
    }

    let config = AppConfig::get();
    let plain_password = student_data
        .password
        .unwrap_or_else(|| config.import.default_password.clone());

    let password_hash = match hash_password(&plain_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let create_req = CreateUserRequest {
        username: student_data.username,
        password: None,
        role: UserRole::Student,
        name: student_data.name,
        email: student_data.email,
        class_id: Some(class_id),
    };

    match storage.create_user(create_req, &password_hash).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(user, "学生创建成功"))),
        Err(e) => {
            if e.is_unique_violation() {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserAlreadyExists,
                    "Username already exists",
                )))
            } else {
                error!("Failed to create student in class {}: {}", class_id, e);
                Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("Failed to create student: {e}"),
                )))
            }
        }
    }
}
