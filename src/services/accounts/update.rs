use tracing::info;

use super::AccountService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::{ClassroomError, Result};
use crate::models::accounts::{
    entities::{Account, AccountChanges, Role},
    requests::UpdateAccountRequest,
};
use crate::utils::validate::{require_text, validate_password, validate_username};

pub async fn update_account(
    service: &AccountService,
    caller: &Caller,
    account_id: i64,
    req: UpdateAccountRequest,
) -> Result<Account> {
    authorize(caller, Role::admin_roles(), Ownership::Unscoped)?;

    let username = req.username.trim().to_string();
    validate_username(&username)?;
    let full_name = require_text("full_name", &req.full_name)?;

    let ctx = service.ctx();

    // 空密码视为不修改
    let password_hash = match req.password.filter(|p| !p.is_empty()) {
        Some(password) => {
            validate_password(&password)?;
            Some(ctx.verifier().hash(&password)?)
        }
        None => None,
    };

    let account = ctx
        .storage()
        .update_account(
            account_id,
            AccountChanges {
                username,
                full_name,
                password_hash,
            },
        )
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("account {account_id}")))?;

    info!("Account {} updated by {}", account.id, caller.account_id);
    Ok(account)
}
