use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 创建班级请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
}

// 更新班级请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
}

// 班级列表查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListQuery {
    // 按负责教师过滤，教师端查自己名下班级时使用
    pub teacher_id: Option<i64>,
}
