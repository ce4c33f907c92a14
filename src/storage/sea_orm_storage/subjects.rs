use super::SeaOrmStorage;
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, WenjuanError};
use crate::models::subjects::{
    entities::{Subject, SubjectStatus},
    requests::{CreateSubjectRequest, UpdateSubjectRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课题
    pub async fn create_subject_impl(
        &self,
        teacher_id: i64,
        req: CreateSubjectRequest,
    ) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            background: Set(req.background),
            teacher_id: Set(teacher_id),
            status: Set(req.status.unwrap_or(SubjectStatus::Draft).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("创建课题失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取课题
    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询课题失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出某教师的全部课题
    pub async fn list_subjects_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        let rows = Subjects::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询课题列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 更新课题信息
    pub async fn update_subject_impl(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let existing = self.get_subject_by_id_impl(subject_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(subject_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(background) = update.background {
            model.background = Set(Some(background));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("更新课题失败: {e}")))?;

        self.get_subject_by_id_impl(subject_id).await
    }

    /// 删除课题，同一事务中清空题库
    pub async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WenjuanError::database_operation(format!("开启事务失败: {e}")))?;

        Questions::delete_many()
            .filter(QuestionColumn::SubjectId.eq(subject_id))
            .exec(&txn)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("删除课题题目失败: {e}")))?;

        let result = Subjects::delete_by_id(subject_id)
            .exec(&txn)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("删除课题失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| WenjuanError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
