//! 账号存储操作

use super::{SeaOrmStorage, classify_db_err, query_err};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::accounts::entities::{Account, AccountChanges, NewAccount, Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建账号
    pub async fn create_account_impl(&self, account: NewAccount) -> Result<Account> {
        let model = ActiveModel {
            username: Set(account.username),
            password_hash: Set(account.password_hash),
            full_name: Set(account.full_name),
            role: Set(account.role.to_string()),
            created_at: Set(account.created_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| classify_db_err(e, "创建账号失败", ClassroomError::DuplicateUsername))?;

        Ok(result.into_account())
    }

    /// 通过 ID 获取账号
    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err("查询账号失败"))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 通过用户名获取账号
    pub async fn get_account_by_username_impl(&self, username: &str) -> Result<Option<Account>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err("查询账号失败"))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 列出账号
    pub async fn list_accounts_impl(&self, role: Option<Role>) -> Result<Vec<Account>> {
        let mut select = Users::find();

        // 角色筛选
        if let Some(role) = role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let models = select
            .order_by_asc(Column::FullName)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err("查询账号列表失败"))?;

        Ok(models.into_iter().map(|m| m.into_account()).collect())
    }

    /// 更新账号
    pub async fn update_account_impl(
        &self,
        id: i64,
        changes: AccountChanges,
    ) -> Result<Option<Account>> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err("查询账号失败"))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.username = Set(changes.username);
        active.full_name = Set(changes.full_name);
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| classify_db_err(e, "更新账号失败", ClassroomError::DuplicateUsername))?;

        Ok(Some(updated.into_account()))
    }

    /// 删除账号（存在依赖数据时由外键约束拒绝）
    pub async fn delete_account_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| classify_db_err(e, "删除账号失败", ClassroomError::Validation))?;

        Ok(result.rows_affected > 0)
    }
}
