use tracing::info;

use super::AccountService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::{ClassroomError, Result};
use crate::models::accounts::entities::Role;

// 仍有关联数据的账号由外键约束拒绝删除
pub async fn delete_account(
    service: &AccountService,
    caller: &Caller,
    account_id: i64,
) -> Result<()> {
    authorize(caller, Role::admin_roles(), Ownership::Unscoped)?;

    if account_id == caller.account_id {
        return Err(ClassroomError::validation("cannot delete the current account"));
    }

    let deleted = service.ctx().storage().delete_account(account_id).await?;
    if !deleted {
        return Err(ClassroomError::not_found(format!("account {account_id}")));
    }

    info!("Account {} deleted by {}", account_id, caller.account_id);
    Ok(())
}
