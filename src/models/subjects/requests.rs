use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::SubjectStatus;

// 创建课题请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub background: Option<String>,
    // 缺省创建为草稿
    pub status: Option<SubjectStatus>,
}

// 更新课题请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub background: Option<String>,
    pub status: Option<SubjectStatus>,
}
