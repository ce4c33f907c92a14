use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateStudentRequest;
use crate::services::ClassService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ClassService 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// 管理端处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassListQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(query.into_inner(), &req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(class_data.into_inner(), &req)
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(class_id.0, &req).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeIDI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(class_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(class_id.0, &req).await
}

pub async fn list_students(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_students(class_id.0, &req).await
}

pub async fn create_student(
    req: HttpRequest,
    class_id: SafeIDI64,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_student(class_id.0, student_data.into_inner(), &req)
        .await
}

pub async fn import_students(
    req: HttpRequest,
    class_id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .import_students(class_id.0, payload, &req)
        .await
}

// 教师端处理程序
pub async fn list_own_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_own_classes(&req).await
}

pub async fn list_own_students(
    req: HttpRequest,
    class_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_students_owned(class_id.0, &req).await
}

// 配置路由：班级管理在管理端，教师端只读自己名下的班级
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_classes))
                    .route("", web::post().to(create_class))
                    .route("/{id}", web::get().to(get_class))
                    .route("/{id}", web::put().to(update_class))
                    .route("/{id}", web::delete().to(delete_class))
                    .route("/{id}/students", web::get().to(list_students))
                    .route("/{id}/students", web::post().to(create_student))
                    .route("/{id}/students/import", web::post().to(import_students)),
            ),
    );

    cfg.service(
        web::scope("/api/v1/teacher/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::get().to(list_own_classes))
                    .route("/{id}/students", web::get().to(list_own_students)),
            ),
    );
}
