use tracing::debug;

use super::AccountService;
use crate::errors::{ClassroomError, Result};
use crate::models::accounts::entities::Account;

// 未知用户名与密码错误返回同一个错误
pub async fn verify_credentials(
    service: &AccountService,
    username: &str,
    password: &str,
) -> Result<Account> {
    let ctx = service.ctx();
    let account = ctx.storage().get_account_by_username(username.trim()).await?;

    match account {
        Some(account) if ctx.verifier().verify(password, &account.password_hash) => Ok(account),
        _ => {
            debug!("Credential check failed for username {}", username);
            Err(ClassroomError::invalid_credentials(
                "invalid username or password",
            ))
        }
    }
}
