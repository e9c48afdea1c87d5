use serde::Serialize;

use crate::models::accounts::entities::Account;

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// 有效期（秒）
    pub expires_in: i64,
    pub account: Account,
}
