//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 唯一约束与外键约束由数据库保证，违反时映射为对应的领域错误。

mod accounts;
mod assignments;
mod attendance;
mod enrollments;
mod materials;
mod sessions;

use crate::config::DatabaseConfig;
use crate::errors::{ClassroomError, Result, is_foreign_key_violation};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化，内存库单连接）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassroomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库的每个连接都是独立数据库，只能保留一个且永不回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassroomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 按约束类型分类数据库错误
///
/// 唯一约束冲突交给 `on_unique` 转换为该关系的领域错误，
/// 外键约束失败视为输入校验错误，其余归为数据库操作错误。
pub(crate) fn classify_db_err(
    err: DbErr,
    context: &str,
    on_unique: fn(String) -> ClassroomError,
) -> ClassroomError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return on_unique(format!("{context}: {detail}"));
    }
    if is_foreign_key_violation(&err) {
        return ClassroomError::validation(format!("{context}: {err}"));
    }
    ClassroomError::database_operation(format!("{context}: {err}"))
}

/// 不涉及约束的查询错误
pub(crate) fn query_err(context: &'static str) -> impl Fn(DbErr) -> ClassroomError {
    move |e| ClassroomError::database_operation(format!("{context}: {e}"))
}

// Storage trait 实现
use crate::models::{
    accounts::entities::{Account, AccountChanges, NewAccount, Role},
    assignments::entities::{Assignment, AssignmentListing, NewAssignment, ReviewRecord},
    attendance::entities::{AttendanceSheetRow, AttendanceStatus, LearnerAttendance},
    enrollments::entities::Enrollment,
    materials::entities::{Material, NewMaterial},
    sessions::entities::{NewSession, Session, SessionListing},
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        self.create_account_impl(account).await
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.get_account_by_username_impl(username).await
    }

    async fn list_accounts(&self, role: Option<Role>) -> Result<Vec<Account>> {
        self.list_accounts_impl(role).await
    }

    async fn update_account(&self, id: i64, changes: AccountChanges) -> Result<Option<Account>> {
        self.update_account_impl(id, changes).await
    }

    async fn delete_account(&self, id: i64) -> Result<bool> {
        self.delete_account_impl(id).await
    }

    // 场次模块
    async fn create_session(&self, session: NewSession) -> Result<Session> {
        self.create_session_impl(session).await
    }

    async fn get_session_by_id(&self, id: i64) -> Result<Option<Session>> {
        self.get_session_by_id_impl(id).await
    }

    async fn list_sessions_by_instructor(&self, instructor_id: i64) -> Result<Vec<Session>> {
        self.list_sessions_by_instructor_impl(instructor_id).await
    }

    async fn list_sessions_with_instructor(&self) -> Result<Vec<SessionListing>> {
        self.list_sessions_with_instructor_impl().await
    }

    // 选课模块
    async fn create_enrollment(
        &self,
        learner_id: i64,
        session_id: i64,
        enrolled_at: i64,
    ) -> Result<Enrollment> {
        self.create_enrollment_impl(learner_id, session_id, enrolled_at)
            .await
    }

    async fn get_enrollment(
        &self,
        learner_id: i64,
        session_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(learner_id, session_id).await
    }

    async fn list_enrolled_sessions(&self, learner_id: i64) -> Result<Vec<SessionListing>> {
        self.list_enrolled_sessions_impl(learner_id).await
    }

    async fn list_available_sessions(&self, learner_id: i64) -> Result<Vec<SessionListing>> {
        self.list_available_sessions_impl(learner_id).await
    }

    async fn list_enrolled_learners(&self, session_id: i64) -> Result<Vec<Account>> {
        self.list_enrolled_learners_impl(session_id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn review_assignment(
        &self,
        id: i64,
        instructor_id: i64,
        review: ReviewRecord,
    ) -> Result<Option<Assignment>> {
        self.review_assignment_impl(id, instructor_id, review).await
    }

    async fn list_assignments_by_instructor(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<AssignmentListing>> {
        self.list_assignments_by_instructor_impl(instructor_id)
            .await
    }

    async fn list_assignments_by_learner(
        &self,
        learner_id: i64,
        session_id: Option<i64>,
    ) -> Result<Vec<AssignmentListing>> {
        self.list_assignments_by_learner_impl(learner_id, session_id)
            .await
    }

    // 资料模块
    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_materials(&self, session_id: i64) -> Result<Vec<Material>> {
        self.list_materials_impl(session_id).await
    }

    // 考勤模块
    async fn replace_attendance(
        &self,
        session_id: i64,
        date: NaiveDate,
        entries: &BTreeMap<i64, AttendanceStatus>,
        created_at: i64,
    ) -> Result<usize> {
        self.replace_attendance_impl(session_id, date, entries, created_at)
            .await
    }

    async fn attendance_sheet(
        &self,
        session_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceSheetRow>> {
        self.attendance_sheet_impl(session_id, date).await
    }

    async fn list_attendance_by_learner(&self, learner_id: i64) -> Result<Vec<LearnerAttendance>> {
        self.list_attendance_by_learner_impl(learner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("classroom.db").unwrap(),
            "sqlite://classroom.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("redis://h").is_err());
    }

    #[test]
    fn test_classify_generic_error() {
        let err = classify_db_err(
            DbErr::Custom("boom".into()),
            "创建账号失败",
            ClassroomError::DuplicateUsername,
        );
        assert!(matches!(err, ClassroomError::DatabaseOperation(_)));
    }
}
