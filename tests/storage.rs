//! 存储层集成测试，使用内存 SQLite 数据库。

use wenjuan_backend::models::classes::requests::{
    ClassListQuery, CreateClassRequest, UpdateClassRequest,
};
use wenjuan_backend::models::questions::entities::QuestionType;
use wenjuan_backend::models::subjects::entities::SubjectStatus;
use wenjuan_backend::models::subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest};
use wenjuan_backend::models::users::entities::UserRole;
use wenjuan_backend::models::users::requests::{
    CreateUserRequest, UpdateUserRequest, UserListQuery,
};
use wenjuan_backend::storage::Storage;
use wenjuan_backend::storage::sea_orm_storage::SeaOrmStorage;

async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::new_with_url("sqlite::memory:")
        .await
        .expect("in-memory storage should initialize")
}

fn user_request(username: &str, role: UserRole, class_id: Option<i64>) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        password: None,
        role,
        name: format!("{username} 的姓名"),
        email: None,
        class_id,
    }
}

#[tokio::test]
async fn create_and_fetch_user() {
    let storage = memory_storage().await;

    let created = storage
        .create_user(user_request("t001", UserRole::Teacher, None), "hash")
        .await
        .unwrap();
    assert_eq!(created.username, "t001");
    assert_eq!(created.role, UserRole::Teacher);

    let by_id = storage.get_user_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "t001");

    let by_name = storage.get_user_by_username("t001").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    assert!(storage.get_user_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_unique_violation() {
    let storage = memory_storage().await;

    storage
        .create_user(user_request("dup", UserRole::Student, None), "hash")
        .await
        .unwrap();

    let err = storage
        .create_user(user_request("dup", UserRole::Student, None), "hash")
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn non_student_class_id_is_dropped() {
    let storage = memory_storage().await;

    let class = storage
        .create_class(CreateClassRequest {
            name: "高一(1)班".to_string(),
            description: None,
            teacher_id: None,
        })
        .await
        .unwrap();

    // 教师角色即使携带 class_id 也不入班
    let teacher = storage
        .create_user(user_request("t002", UserRole::Teacher, Some(class.id)), "hash")
        .await
        .unwrap();
    assert!(teacher.class_id.is_none());

    let student = storage
        .create_user(user_request("s001", UserRole::Student, Some(class.id)), "hash")
        .await
        .unwrap();
    assert_eq!(student.class_id, Some(class.id));
}

#[tokio::test]
async fn update_user_only_touches_provided_fields() {
    let storage = memory_storage().await;

    let created = storage
        .create_user(
            CreateUserRequest {
                username: "s002".to_string(),
                password: None,
                role: UserRole::Student,
                name: "原姓名".to_string(),
                email: Some("old@example.com".to_string()),
                class_id: None,
            },
            "hash",
        )
        .await
        .unwrap();

    let updated = storage
        .update_user(
            created.id,
            UpdateUserRequest {
                password: None,
                role: None,
                name: Some("新姓名".to_string()),
                email: None,
                class_id: None,
            },
            None,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "新姓名");
    assert_eq!(updated.email.as_deref(), Some("old@example.com"));

    // 更新不存在的用户返回 None
    assert!(
        storage
            .update_user(
                999_999,
                UpdateUserRequest {
                    password: None,
                    role: None,
                    name: Some("x".to_string()),
                    email: None,
                    class_id: None,
                },
                None,
            )
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn promoting_student_clears_class_membership() {
    let storage = memory_storage().await;

    let class = storage
        .create_class(CreateClassRequest {
            name: "原班级".to_string(),
            description: None,
            teacher_id: None,
        })
        .await
        .unwrap();

    let student = storage
        .create_user(user_request("s003", UserRole::Student, Some(class.id)), "hash")
        .await
        .unwrap();
    assert_eq!(student.class_id, Some(class.id));

    let promoted = storage
        .update_user(
            student.id,
            UpdateUserRequest {
                password: None,
                role: Some(UserRole::Teacher),
                name: None,
                email: None,
                class_id: None,
            },
            None,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(promoted.role, UserRole::Teacher);
    assert!(promoted.class_id.is_none());
}

#[tokio::test]
async fn delete_user_is_idempotent() {
    let storage = memory_storage().await;

    let created = storage
        .create_user(user_request("gone", UserRole::Student, None), "hash")
        .await
        .unwrap();

    assert!(storage.delete_user(created.id).await.unwrap());
    assert!(!storage.delete_user(created.id).await.unwrap());
    assert!(storage.get_user_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_users_filters_by_role_and_search() {
    let storage = memory_storage().await;

    storage
        .create_user(user_request("teacher_wang", UserRole::Teacher, None), "hash")
        .await
        .unwrap();
    storage
        .create_user(user_request("student_li", UserRole::Student, None), "hash")
        .await
        .unwrap();
    storage
        .create_user(user_request("student_zhao", UserRole::Student, None), "hash")
        .await
        .unwrap();

    let students = storage
        .list_users(UserListQuery {
            role: Some(UserRole::Student),
            class_id: None,
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(students.len(), 2);
    assert!(students.iter().all(|u| u.user.role == UserRole::Student));

    let matched = storage
        .list_users(UserListQuery {
            role: None,
            class_id: None,
            search: Some("zhao".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].user.username, "student_zhao");
}

#[tokio::test]
async fn class_listing_carries_teacher_name_and_student_count() {
    let storage = memory_storage().await;

    let teacher = storage
        .create_user(user_request("t100", UserRole::Teacher, None), "hash")
        .await
        .unwrap();

    let class = storage
        .create_class(CreateClassRequest {
            name: "高二(3)班".to_string(),
            description: Some("理科班".to_string()),
            teacher_id: Some(teacher.id),
        })
        .await
        .unwrap();

    storage
        .create_user(user_request("s100", UserRole::Student, Some(class.id)), "hash")
        .await
        .unwrap();
    storage
        .create_user(user_request("s101", UserRole::Student, Some(class.id)), "hash")
        .await
        .unwrap();

    let listed = storage
        .list_classes(ClassListQuery { teacher_id: None })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].teacher_name.as_deref(), Some(teacher.name.as_str()));
    assert_eq!(listed[0].student_count, 2);

    // 按教师过滤
    let mine = storage
        .list_classes(ClassListQuery {
            teacher_id: Some(teacher.id),
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);

    let none = storage
        .list_classes(ClassListQuery {
            teacher_id: Some(teacher.id + 1),
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn deleting_class_unlinks_students() {
    let storage = memory_storage().await;

    let class = storage
        .create_class(CreateClassRequest {
            name: "将删除".to_string(),
            description: None,
            teacher_id: None,
        })
        .await
        .unwrap();

    let student = storage
        .create_user(user_request("s200", UserRole::Student, Some(class.id)), "hash")
        .await
        .unwrap();
    assert_eq!(student.class_id, Some(class.id));

    assert!(storage.delete_class(class.id).await.unwrap());
    assert!(!storage.delete_class(class.id).await.unwrap());

    // 学生保留，但脱离已删除的班级
    let survivor = storage.get_user_by_id(student.id).await.unwrap().unwrap();
    assert!(survivor.class_id.is_none());
}

#[tokio::test]
async fn update_class_partial_fields() {
    let storage = memory_storage().await;

    let class = storage
        .create_class(CreateClassRequest {
            name: "旧名".to_string(),
            description: Some("旧描述".to_string()),
            teacher_id: None,
        })
        .await
        .unwrap();

    let updated = storage
        .update_class(
            class.id,
            UpdateClassRequest {
                name: Some("新名".to_string()),
                description: None,
                teacher_id: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "新名");
    assert_eq!(updated.description.as_deref(), Some("旧描述"));
}

#[tokio::test]
async fn subject_lifecycle_and_cascade_delete() {
    let storage = memory_storage().await;

    let teacher = storage
        .create_user(user_request("t300", UserRole::Teacher, None), "hash")
        .await
        .unwrap();

    let subject = storage
        .create_subject(
            teacher.id,
            CreateSubjectRequest {
                name: "中学生睡眠情况调研".to_string(),
                description: None,
                background: Some("<p>背景介绍</p>".to_string()),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(subject.status, SubjectStatus::Draft);
    assert_eq!(subject.teacher_id, teacher.id);

    let published = storage
        .update_subject(
            subject.id,
            UpdateSubjectRequest {
                name: None,
                description: None,
                background: None,
                status: Some(SubjectStatus::Published),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(published.status, SubjectStatus::Published);

    let question = storage
        .create_question(
            subject.id,
            "你平均每天睡几个小时？",
            QuestionType::Single,
            Some(r#"["少于6小时","6-8小时","8小时以上"]"#.to_string()),
        )
        .await
        .unwrap();

    assert!(storage.delete_subject(subject.id).await.unwrap());
    assert!(!storage.delete_subject(subject.id).await.unwrap());

    // 课题删除后题目一并删除
    assert!(
        storage
            .get_question_by_id(question.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(storage.list_questions(subject.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn question_options_survive_storage() {
    let storage = memory_storage().await;

    let teacher = storage
        .create_user(user_request("t400", UserRole::Teacher, None), "hash")
        .await
        .unwrap();
    let subject = storage
        .create_subject(
            teacher.id,
            CreateSubjectRequest {
                name: "问卷".to_string(),
                description: None,
                background: None,
                status: None,
            },
        )
        .await
        .unwrap();

    storage
        .create_question(
            subject.id,
            "选择题",
            QuestionType::Multi,
            Some(r#"["A","B","C"]"#.to_string()),
        )
        .await
        .unwrap();
    storage
        .create_question(subject.id, "填空题", QuestionType::Text, None)
        .await
        .unwrap();

    let questions = storage.list_questions(subject.id).await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(
        questions[0].options,
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );
    assert_eq!(questions[0].question_type, QuestionType::Multi);
    assert!(questions[1].options.is_none());
}

#[tokio::test]
async fn role_and_class_counts() {
    let storage = memory_storage().await;

    storage
        .create_user(user_request("t500", UserRole::Teacher, None), "hash")
        .await
        .unwrap();
    storage
        .create_user(user_request("s500", UserRole::Student, None), "hash")
        .await
        .unwrap();
    storage
        .create_user(user_request("s501", UserRole::Student, None), "hash")
        .await
        .unwrap();
    storage
        .create_class(CreateClassRequest {
            name: "班级A".to_string(),
            description: None,
            teacher_id: None,
        })
        .await
        .unwrap();

    assert_eq!(storage.count_users_by_role(&UserRole::Teacher).await.unwrap(), 1);
    assert_eq!(storage.count_users_by_role(&UserRole::Student).await.unwrap(), 2);
    assert_eq!(storage.count_users_by_role(&UserRole::Admin).await.unwrap(), 0);
    assert_eq!(storage.count_classes().await.unwrap(), 1);
}

#[tokio::test]
async fn class_roster_only_contains_students() {
    let storage = memory_storage().await;

    let class = storage
        .create_class(CreateClassRequest {
            name: "名册班".to_string(),
            description: None,
            teacher_id: None,
        })
        .await
        .unwrap();

    storage
        .create_user(user_request("s601", UserRole::Student, Some(class.id)), "hash")
        .await
        .unwrap();
    storage
        .create_user(user_request("s600", UserRole::Student, Some(class.id)), "hash")
        .await
        .unwrap();
    storage
        .create_user(user_request("s700", UserRole::Student, None), "hash")
        .await
        .unwrap();

    let roster = storage.list_class_students(class.id).await.unwrap();
    // 按学号排序
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].username, "s600");
    assert_eq!(roster[1].username, "s601");
}
