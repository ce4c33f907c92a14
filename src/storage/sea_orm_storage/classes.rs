use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, WenjuanError};
use crate::models::classes::{
    entities::Class,
    requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    responses::ClassListItem,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出班级，连带教师姓名与学生人数
    pub async fn list_classes_impl(&self, query: ClassListQuery) -> Result<Vec<ClassListItem>> {
        let mut select = Classes::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let rows = select
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询班级列表失败: {e}")))?;

        // 学生人数一次分组统计，避免逐班级查询
        #[derive(FromQueryResult)]
        struct StudentCount {
            class_id: i64,
            count: i64,
        }

        let counts: HashMap<i64, i64> = Users::find()
            .select_only()
            .column(UserColumn::ClassId)
            .column_as(UserColumn::Id.count(), "count")
            .filter(UserColumn::ClassId.is_not_null())
            .group_by(UserColumn::ClassId)
            .into_model::<StudentCount>()
            .all(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("统计班级学生数量失败: {e}")))?
            .into_iter()
            .map(|c| (c.class_id, c.count))
            .collect();

        Ok(rows
            .into_iter()
            .map(|(class, teacher)| {
                let student_count = counts.get(&class.id).copied().unwrap_or(0);
                ClassListItem {
                    class: class.into_class(),
                    teacher_name: teacher.map(|t| t.name),
                    student_count,
                }
            })
            .collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级，同一事务中解除学生的班级归属
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WenjuanError::database_operation(format!("开启事务失败: {e}")))?;

        // 学生保留账号，只断开班级引用
        Users::update_many()
            .col_expr(
                UserColumn::ClassId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(UserColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("解除学生班级归属失败: {e}")))?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| WenjuanError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计班级数量
    pub async fn count_classes_impl(&self) -> Result<u64> {
        let count = Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("统计班级数量失败: {e}")))?;

        Ok(count)
    }
}
