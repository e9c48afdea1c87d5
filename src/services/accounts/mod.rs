pub mod create;
pub mod delete;
pub mod list;
pub mod login;
pub mod seed;
pub mod update;

use crate::authz::Caller;
use crate::config::AdminSeedConfig;
use crate::errors::Result;
use crate::models::accounts::{
    entities::{Account, Role},
    requests::{CreateAccountRequest, UpdateAccountRequest},
};

use super::ServiceContext;

pub struct AccountService {
    ctx: ServiceContext,
}

impl AccountService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    // 创建账号（管理员）
    pub async fn create_account(
        &self,
        caller: &Caller,
        req: CreateAccountRequest,
    ) -> Result<Account> {
        create::create_account(self, caller, req).await
    }

    // 校验用户名与密码
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Account> {
        login::verify_credentials(self, username, password).await
    }

    // 更新账号（管理员）
    pub async fn update_account(
        &self,
        caller: &Caller,
        account_id: i64,
        req: UpdateAccountRequest,
    ) -> Result<Account> {
        update::update_account(self, caller, account_id, req).await
    }

    // 删除账号（管理员）
    pub async fn delete_account(&self, caller: &Caller, account_id: i64) -> Result<()> {
        delete::delete_account(self, caller, account_id).await
    }

    // 列出账号（管理员）
    pub async fn list_accounts(&self, caller: &Caller, role: Option<Role>) -> Result<Vec<Account>> {
        list::list_accounts(self, caller, role).await
    }

    // 当前账号信息
    pub async fn get_profile(&self, caller: &Caller) -> Result<Account> {
        list::get_profile(self, caller).await
    }

    // 初始化默认管理员，已存在时跳过
    pub async fn seed_default_admin(&self, config: &AdminSeedConfig) -> Result<bool> {
        seed::seed_default_admin(self, config).await
    }
}
