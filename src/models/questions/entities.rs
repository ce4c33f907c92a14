use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionType {
    Single, // 单选
    Multi,  // 多选
    Text,   // 填空
    Scale,  // 量表
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Single => write!(f, "single"),
            QuestionType::Multi => write!(f, "multi"),
            QuestionType::Text => write!(f, "text"),
            QuestionType::Scale => write!(f, "scale"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(QuestionType::Single),
            "multi" => Ok(QuestionType::Multi),
            "text" => Ok(QuestionType::Text),
            "scale" => Ok(QuestionType::Scale),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

// 题目实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub subject_id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    // 仅选择类题目有选项
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
