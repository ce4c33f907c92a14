use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::UserRole;

// 创建用户请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    // 省略时使用系统默认密码
    pub password: Option<String>,
    pub role: UserRole,
    pub name: String,
    pub email: Option<String>,
    pub class_id: Option<i64>,
}

// 更新用户请求，所有字段可选，只更新提供的字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub class_id: Option<i64>,
}

// 向班级添加单个学生的请求（班级ID来自路径）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateStudentRequest {
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    // 省略时使用系统默认密码
    pub password: Option<String>,
}

// 用户列表查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub class_id: Option<i64>,
    // 按用户名或姓名模糊搜索
    pub search: Option<String>,
}
