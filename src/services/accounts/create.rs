use tracing::info;

use super::AccountService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::Result;
use crate::models::accounts::{
    entities::{Account, NewAccount, Role},
    requests::CreateAccountRequest,
};
use crate::utils::validate::{require_text, validate_password, validate_username};

pub async fn create_account(
    service: &AccountService,
    caller: &Caller,
    req: CreateAccountRequest,
) -> Result<Account> {
    authorize(caller, Role::admin_roles(), Ownership::Unscoped)?;

    let username = req.username.trim().to_string();
    validate_username(&username)?;
    validate_password(&req.password)?;
    let full_name = require_text("full_name", &req.full_name)?;

    let ctx = service.ctx();
    let password_hash = ctx.verifier().hash(&req.password)?;

    // 用户名唯一性由数据库唯一约束保证
    let account = ctx
        .storage()
        .create_account(NewAccount {
            username,
            password_hash,
            full_name,
            role: req.role,
            created_at: ctx.clock().now().timestamp(),
        })
        .await?;

    info!(
        "Account {} ({}) created by {}",
        account.username, account.role, caller.account_id
    );
    Ok(account)
}
