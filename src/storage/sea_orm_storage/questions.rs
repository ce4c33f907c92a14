use super::SeaOrmStorage;
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{Result, WenjuanError};
use crate::models::questions::entities::{Question, QuestionType};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出课题下的题目，按创建顺序
    pub async fn list_questions_impl(&self, subject_id: i64) -> Result<Vec<Question>> {
        let rows = Questions::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_question()).collect())
    }

    /// 创建题目
    pub async fn create_question_impl(
        &self,
        subject_id: i64,
        text: &str,
        question_type: QuestionType,
        options_json: Option<String>,
    ) -> Result<Question> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(subject_id),
            text: Set(text.to_string()),
            r#type: Set(question_type.to_string()),
            options: Set(options_json),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, question_id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 删除题目
    pub async fn delete_question_impl(&self, question_id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
