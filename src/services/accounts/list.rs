use super::AccountService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::{ClassroomError, Result};
use crate::models::accounts::entities::{Account, Role};

pub async fn list_accounts(
    service: &AccountService,
    caller: &Caller,
    role: Option<Role>,
) -> Result<Vec<Account>> {
    authorize(caller, Role::admin_roles(), Ownership::Unscoped)?;
    service.ctx().storage().list_accounts(role).await
}

pub async fn get_profile(service: &AccountService, caller: &Caller) -> Result<Account> {
    authorize(caller, Role::all_roles(), Ownership::Unscoped)?;
    service
        .ctx()
        .storage()
        .get_account_by_id(caller.account_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("account {}", caller.account_id)))
}
