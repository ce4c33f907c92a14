//! 路由层集成测试：认证/授权中间件与批量导入端到端行为。

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};

use wenjuan_backend::models::users::entities::{User, UserRole};
use wenjuan_backend::models::users::requests::CreateUserRequest;
use wenjuan_backend::routes::{configure_classes_routes, configure_user_routes};
use wenjuan_backend::storage::Storage;
use wenjuan_backend::storage::sea_orm_storage::SeaOrmStorage;
use wenjuan_backend::utils::jwt::JwtUtils;
use wenjuan_backend::utils::password::hash_password;

async fn memory_storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::new_with_url("sqlite::memory:")
        .await
        .expect("in-memory storage should initialize");
    Arc::new(storage)
}

async fn create_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    let hash = hash_password("secret").unwrap();
    storage
        .create_user(
            CreateUserRequest {
                username: username.to_string(),
                password: None,
                role,
                name: format!("{username} 的姓名"),
                email: None,
                class_id: None,
            },
            &hash,
        )
        .await
        .unwrap()
}

fn token_for(user: &User) -> String {
    JwtUtils::generate_token(user.id, &user.username, &user.role.to_string(), &user.name).unwrap()
}

#[tokio::test]
async fn admin_routes_enforce_token_and_role() {
    let storage = memory_storage().await;
    let admin = create_user(&storage, "admin01", UserRole::Admin).await;
    let teacher = create_user(&storage, "teacher01", UserRole::Teacher).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .configure(configure_user_routes),
    )
    .await;

    // 无令牌 -> 401
    let req = test::TestRequest::get().uri("/api/v1/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 伪造令牌 -> 401
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 教师令牌访问管理端 -> 403（角色严格等值匹配）
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {}", token_for(&teacher))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 管理员令牌 -> 200
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {}", token_for(&admin))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn deleted_user_token_is_rejected() {
    let storage = memory_storage().await;
    let admin = create_user(&storage, "admin02", UserRole::Admin).await;
    let token = token_for(&admin);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .configure(configure_user_routes),
    )
    .await;

    // 删除账号后，仍在有效期内的令牌也一并失效
    assert!(storage.delete_user(admin.id).await.unwrap());

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

fn multipart_csv_body(boundary: &str, csv: &str) -> String {
    format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"students.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{boundary}--\r\n"
    )
}

#[tokio::test]
async fn import_students_reports_row_errors_without_aborting() {
    let storage = memory_storage().await;
    let admin = create_user(&storage, "admin03", UserRole::Admin).await;
    let token = token_for(&admin);

    let class = storage
        .create_class(wenjuan_backend::models::classes::requests::CreateClassRequest {
            name: "导入班".to_string(),
            description: None,
            teacher_id: None,
        })
        .await
        .unwrap();

    // 预置一个同名学生制造用户名冲突
    create_user(&storage, "dup01", UserRole::Student).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .configure(configure_classes_routes),
    )
    .await;

    // 4 个数据行：2 行有效，1 行缺姓名，1 行用户名已存在
    let csv = "username,name,email\n\
               s901,Wang Wu,\n\
               s902,,\n\
               dup01,Zhao Liu,\n\
               s903,Qian Qi,\n";
    let boundary = "----import-test-boundary";

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/classes/{}/students/import", class.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_csv_body(boundary, csv))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["imported"], 2);

    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    let joined = errors
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect::<Vec<_>>()
        .join("\n");
    // 缺字段与重名分别给出不同的行级错误
    assert!(joined.contains("missing required field"));
    assert!(joined.contains("'dup01' already exists"));

    // 有效行入库并挂入班级，坏行完全未写入
    let imported = storage.get_user_by_username("s901").await.unwrap().unwrap();
    assert_eq!(imported.class_id, Some(class.id));
    assert_eq!(imported.role, UserRole::Student);
    assert!(storage.get_user_by_username("s902").await.unwrap().is_none());
    assert!(storage.get_user_by_username("s903").await.unwrap().is_some());
}
