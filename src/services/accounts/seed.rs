use tracing::{debug, info, warn};

use super::AccountService;
use crate::config::AdminSeedConfig;
use crate::errors::{ClassroomError, Result};
use crate::models::accounts::entities::{NewAccount, Role};

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号，返回是否新建
///
/// 种子密码不经过密码策略校验。
pub async fn seed_default_admin(service: &AccountService, config: &AdminSeedConfig) -> Result<bool> {
    let ctx = service.ctx();

    if ctx
        .storage()
        .get_account_by_username(&config.username)
        .await?
        .is_some()
    {
        debug!(
            "Admin account '{}' already exists, skipping admin seed",
            config.username
        );
        return Ok(false);
    }

    // 获取密码：优先使用配置，否则生成随机密码
    let password = match config.password.clone().filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => {
            let pwd = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        }
    };

    let password_hash = ctx.verifier().hash(&password)?;

    let result = ctx
        .storage()
        .create_account(NewAccount {
            username: config.username.clone(),
            password_hash,
            full_name: config.full_name.clone(),
            role: Role::Admin,
            created_at: ctx.clock().now().timestamp(),
        })
        .await;

    match result {
        Ok(account) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                account.id, account.username
            );
            Ok(true)
        }
        // 并发启动时另一实例已写入
        Err(ClassroomError::DuplicateUsername(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
