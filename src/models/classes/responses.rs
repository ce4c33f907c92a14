use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Class;

// 班级列表项，附带教师姓名与学生人数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    pub student_count: i64,
}
