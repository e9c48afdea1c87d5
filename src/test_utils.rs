//! 测试辅助：内存数据库、内存附件存储、固定时钟

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::authz::Caller;
use crate::blobs::MemoryBlobStore;
use crate::config::{Argon2Config, DatabaseConfig};
use crate::entity::sessions;
use crate::models::accounts::entities::{Account, NewAccount, Role};
use crate::models::sessions::entities::{NewSession, Session, SessionStatus};
use crate::services::ServiceContext;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::{Argon2Verifier, Clock, CredentialVerifier};

pub const TEST_PASSWORD: &str = "passw0rd-test";

/// 固定时钟
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    fixed_now().date_naive()
}

pub fn cheap_verifier() -> Arc<dyn CredentialVerifier> {
    Arc::new(
        Argon2Verifier::new(&Argon2Config {
            memory_cost: 8,
            time_cost: 1,
            parallelism: 1,
        })
        .unwrap(),
    )
}

pub async fn setup_test_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config).await.unwrap()
}

pub async fn setup_test_context() -> ServiceContext {
    setup_test_context_with_db().await.0
}

/// 时钟固定在给定时刻的上下文
pub async fn setup_test_context_at(now: DateTime<Utc>) -> ServiceContext {
    build_test_context(now).await.0
}

/// 同时返回底层存储，供测试直接改库（例如模拟场次状态变化）
pub async fn setup_test_context_with_db() -> (ServiceContext, SeaOrmStorage) {
    build_test_context(fixed_now()).await
}

async fn build_test_context(now: DateTime<Utc>) -> (ServiceContext, SeaOrmStorage) {
    let db = setup_test_storage().await;
    let ctx = ServiceContext::new(
        Arc::new(db.clone()),
        Arc::new(MemoryBlobStore::new()),
        cheap_verifier(),
        Arc::new(FixedClock::new(now)),
    );
    (ctx, db)
}

pub async fn set_session_status(db: &SeaOrmStorage, session_id: i64, status: SessionStatus) {
    sessions::Entity::update_many()
        .col_expr(sessions::Column::Status, Expr::value(status.to_string()))
        .filter(sessions::Column::Id.eq(session_id))
        .exec(&db.db)
        .await
        .unwrap();
}

/// 直接写入存储的账号，绕过管理员授权
pub async fn seed_account(ctx: &ServiceContext, username: &str, role: Role) -> Account {
    let password_hash = ctx.verifier().hash(TEST_PASSWORD).unwrap();
    ctx.storage()
        .create_account(NewAccount {
            username: username.to_string(),
            password_hash,
            full_name: format!("{username} name"),
            role,
            created_at: fixed_now().timestamp(),
        })
        .await
        .unwrap()
}

pub async fn seed_session(ctx: &ServiceContext, instructor: &Account, title: &str) -> Session {
    ctx.storage()
        .create_session(NewSession {
            title: title.to_string(),
            description: None,
            instructor_id: instructor.id,
            scheduled_at: fixed_now().timestamp() + 3600,
            meeting_ref: None,
            created_at: fixed_now().timestamp(),
        })
        .await
        .unwrap()
}

pub fn caller(account: &Account) -> Caller {
    Caller::new(account.id, account.role)
}
