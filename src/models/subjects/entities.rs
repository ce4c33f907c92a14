use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 调研课题状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub enum SubjectStatus {
    Draft,     // 草稿，仅教师自己可见
    Published, // 已发布
}

impl std::fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectStatus::Draft => write!(f, "draft"),
            SubjectStatus::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for SubjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SubjectStatus::Draft),
            "published" => Ok(SubjectStatus::Published),
            _ => Err(format!("Invalid subject status: {s}")),
        }
    }
}

// 调研课题实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    // 课题背景介绍，富文本
    pub background: Option<String>,
    pub teacher_id: i64,
    pub status: SubjectStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
