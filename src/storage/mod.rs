use std::sync::Arc;

use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListItem,
    },
    questions::entities::{Question, QuestionType},
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, UpdateSubjectRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListItem,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，password_hash 为已哈希的密码
    async fn create_user(&self, user: CreateUserRequest, password_hash: &str) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出用户，附带班级名称
    async fn list_users(&self, query: UserListQuery) -> Result<Vec<UserListItem>>;
    // 更新用户信息，password_hash 提供时覆盖密码
    async fn update_user(
        &self,
        id: i64,
        update: UpdateUserRequest,
        password_hash: Option<String>,
    ) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 按角色统计用户数量
    async fn count_users_by_role(&self, role: &UserRole) -> Result<u64>;
    // 列出某班级的全部学生
    async fn list_class_students(&self, class_id: i64) -> Result<Vec<User>>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出班级，附带教师姓名与学生人数
    async fn list_classes(&self, query: ClassListQuery) -> Result<Vec<ClassListItem>>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级，同时解除学生的班级归属
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 统计班级数量
    async fn count_classes(&self) -> Result<u64>;

    /// 课题管理方法
    // 创建课题
    async fn create_subject(&self, teacher_id: i64, subject: CreateSubjectRequest)
    -> Result<Subject>;
    // 通过ID获取课题信息
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    // 列出某教师的全部课题
    async fn list_subjects_by_teacher(&self, teacher_id: i64) -> Result<Vec<Subject>>;
    // 更新课题信息
    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    // 删除课题，同时删除其题目
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;

    /// 题库管理方法
    // 列出课题下的题目
    async fn list_questions(&self, subject_id: i64) -> Result<Vec<Question>>;
    // 创建题目，options_json 为已归一化的选项JSON文本
    async fn create_question(
        &self,
        subject_id: i64,
        text: &str,
        question_type: QuestionType,
        options_json: Option<String>,
    ) -> Result<Question>;
    // 通过ID获取题目信息
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;
    // 删除题目
    async fn delete_question(&self, question_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
