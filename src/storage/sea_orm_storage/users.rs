use super::SeaOrmStorage;
use crate::entity::classes::Entity as Classes;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, WenjuanError};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    responses::UserListItem,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

// 插入报错时区分唯一约束冲突与其他数据库错误
pub(super) fn map_insert_error(e: sea_orm::DbErr, what: &str) -> WenjuanError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") || msg.contains("duplicate key") {
        WenjuanError::unique_violation(format!("{what}已存在"))
    } else {
        WenjuanError::database_operation(format!("创建{what}失败: {msg}"))
    }
}

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(
        &self,
        req: CreateUserRequest,
        password_hash: &str,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        // 只有学生允许挂靠班级
        let class_id = match req.role {
            UserRole::Student => req.class_id,
            _ => None,
        };

        let model = ActiveModel {
            username: Set(req.username),
            password_hash: Set(password_hash.to_string()),
            role: Set(req.role.to_string()),
            name: Set(req.name),
            email: Set(req.email),
            class_id: Set(class_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "用户"))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出用户，连带班级名称
    pub async fn list_users_impl(&self, query: UserListQuery) -> Result<Vec<UserListItem>> {
        let mut select = Users::find();

        // 搜索条件：用户名或姓名
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Name.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 班级筛选
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let rows = select
            .find_also_related(Classes)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(user, class)| UserListItem {
                user: user.into_user(),
                class_name: class.map(|c| c.name),
            })
            .collect())
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
        password_hash: Option<String>,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(hash) = password_hash {
            model.password_hash = Set(hash);
        }

        if let Some(ref role) = update.role {
            model.role = Set(role.to_string());
            // 角色改为非学生时脱离班级
            if *role != UserRole::Student {
                model.class_id = Set(None);
            }
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }

        if let Some(class_id) = update.class_id {
            // 班级归属只对学生有意义
            let is_student = match update.role {
                Some(ref role) => *role == UserRole::Student,
                None => existing
                    .as_ref()
                    .map(|u| u.role == UserRole::Student)
                    .unwrap_or(false),
            };
            if is_student {
                model.class_id = Set(Some(class_id));
            }
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按角色统计用户数量
    pub async fn count_users_by_role_impl(&self, role: &UserRole) -> Result<u64> {
        let count = Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }

    /// 列出某班级的全部学生
    pub async fn list_class_students_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let rows = Users::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Role.eq(UserRole::STUDENT))
            .order_by_asc(Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| WenjuanError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_user()).collect())
    }
}
