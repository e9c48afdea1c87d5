use std::sync::Arc;

use tracing::{info, warn};

use crate::blobs::create_blob_store;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::ServiceContext;
use crate::storage::create_storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::{Argon2Verifier, SystemClock};

pub struct StartupContext {
    pub services: ServiceContext,
    pub jwt: JwtUtils,
}

/// 组装业务层依赖：存储、附件存储、密码校验与时钟
pub async fn build_services(config: &AppConfig) -> Result<ServiceContext> {
    let storage = create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let blobs = create_blob_store(&config.upload).await?;
    info!("Blob store initialized at {}", config.upload.dir);

    let verifier = Arc::new(Argon2Verifier::new(&config.argon2)?);

    Ok(ServiceContext::new(
        storage,
        blobs,
        verifier,
        Arc::new(SystemClock),
    ))
}

/// 准备服务器启动的上下文
/// 包括存储、附件存储、默认管理员与 JWT 工具
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    let services = build_services(config)
        .await
        .expect("Failed to initialize services");

    // 初始化默认管理员账号（如果需要）
    match services.accounts().seed_default_admin(&config.admin).await {
        Ok(true) => warn!("Default admin account '{}' created", config.admin.username),
        Ok(false) => info!("Admin seed skipped"),
        Err(e) => warn!("Failed to seed admin account: {}", e),
    }

    StartupContext {
        services,
        jwt: JwtUtils::new(&config.jwt),
    }
}
