use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::User;

// 用户列表项，附带班级名称便于前端直接展示
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

// 批量导入结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct ImportResult {
    // 成功写入的学生数量
    pub imported: usize,
    // 逐行错误描述，如 "Line 3: username already exists"
    pub errors: Vec<String>,
}
