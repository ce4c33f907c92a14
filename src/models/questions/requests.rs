use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::QuestionType;

// 选项字段兼容两种形式：字符串数组或已序列化的JSON字符串
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionOptions {
    List(Vec<String>),
    Raw(String),
}

impl QuestionOptions {
    // 归一化为存储用的JSON文本
    pub fn normalize(&self) -> Result<Option<String>, serde_json::Error> {
        match self {
            QuestionOptions::List(items) => {
                if items.is_empty() {
                    return Ok(None);
                }
                serde_json::to_string(items).map(Some)
            }
            QuestionOptions::Raw(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                // 验证确实是字符串数组再原样落库
                let items: Vec<String> = serde_json::from_str(trimmed)?;
                serde_json::to_string(&items).map(Some)
            }
        }
    }
}

// 创建题目请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateQuestionRequest {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Option<QuestionOptions>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_list() {
        let opts = QuestionOptions::List(vec!["是".to_string(), "否".to_string()]);
        assert_eq!(opts.normalize().unwrap(), Some(r#"["是","否"]"#.to_string()));
    }

    #[test]
    fn test_normalize_empty_list() {
        let opts = QuestionOptions::List(vec![]);
        assert_eq!(opts.normalize().unwrap(), None);
    }

    #[test]
    fn test_normalize_raw_json() {
        let opts = QuestionOptions::Raw(r#"["A", "B"]"#.to_string());
        assert_eq!(opts.normalize().unwrap(), Some(r#"["A","B"]"#.to_string()));
    }

    #[test]
    fn test_normalize_raw_invalid() {
        let opts = QuestionOptions::Raw("not json".to_string());
        assert!(opts.normalize().is_err());
    }

    #[test]
    fn test_untagged_deserialization() {
        let from_list: QuestionOptions = serde_json::from_str(r#"["A","B"]"#).unwrap();
        assert!(matches!(from_list, QuestionOptions::List(_)));
        let from_raw: QuestionOptions = serde_json::from_str(r#""[\"A\"]""#).unwrap();
        assert!(matches!(from_raw, QuestionOptions::Raw(_)));
    }
}
