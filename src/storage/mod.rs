use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::DatabaseConfig;
use crate::models::{
    accounts::entities::{Account, AccountChanges, NewAccount, Role},
    assignments::entities::{Assignment, AssignmentListing, NewAssignment, ReviewRecord},
    attendance::entities::{AttendanceSheetRow, AttendanceStatus, LearnerAttendance},
    enrollments::entities::Enrollment,
    materials::entities::{Material, NewMaterial},
    sessions::entities::{NewSession, Session, SessionListing},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号，用户名重复返回 DuplicateUsername
    async fn create_account(&self, account: NewAccount) -> Result<Account>;
    // 通过ID获取账号
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    // 通过用户名获取账号
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;
    // 列出账号，可按角色筛选
    async fn list_accounts(&self, role: Option<Role>) -> Result<Vec<Account>>;
    // 更新账号
    async fn update_account(&self, id: i64, changes: AccountChanges) -> Result<Option<Account>>;
    // 删除账号
    async fn delete_account(&self, id: i64) -> Result<bool>;

    /// 场次管理方法
    async fn create_session(&self, session: NewSession) -> Result<Session>;
    async fn get_session_by_id(&self, id: i64) -> Result<Option<Session>>;
    // 教师自己的场次，按时间升序
    async fn list_sessions_by_instructor(&self, instructor_id: i64) -> Result<Vec<Session>>;
    // 全部场次（附教师姓名）
    async fn list_sessions_with_instructor(&self) -> Result<Vec<SessionListing>>;

    /// 选课管理方法
    // 选课，重复选课返回 AlreadyEnrolled
    async fn create_enrollment(
        &self,
        learner_id: i64,
        session_id: i64,
        enrolled_at: i64,
    ) -> Result<Enrollment>;
    async fn get_enrollment(&self, learner_id: i64, session_id: i64)
    -> Result<Option<Enrollment>>;
    async fn list_enrolled_sessions(&self, learner_id: i64) -> Result<Vec<SessionListing>>;
    // 可选场次：已排期且尚未选的
    async fn list_available_sessions(&self, learner_id: i64) -> Result<Vec<SessionListing>>;
    async fn list_enrolled_learners(&self, session_id: i64) -> Result<Vec<Account>>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 以单条语句写入批阅结果，仅当布置教师匹配时生效
    async fn review_assignment(
        &self,
        id: i64,
        instructor_id: i64,
        review: ReviewRecord,
    ) -> Result<Option<Assignment>>;
    async fn list_assignments_by_instructor(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<AssignmentListing>>;
    async fn list_assignments_by_learner(
        &self,
        learner_id: i64,
        session_id: Option<i64>,
    ) -> Result<Vec<AssignmentListing>>;

    /// 资料管理方法
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    async fn list_materials(&self, session_id: i64) -> Result<Vec<Material>>;

    /// 考勤管理方法
    // 在一个事务内替换某场次某日的全部考勤
    async fn replace_attendance(
        &self,
        session_id: i64,
        date: NaiveDate,
        entries: &BTreeMap<i64, AttendanceStatus>,
        created_at: i64,
    ) -> Result<usize>;
    // 已选学员 LEFT JOIN 当日考勤
    async fn attendance_sheet(
        &self,
        session_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceSheetRow>>;
    async fn list_attendance_by_learner(&self, learner_id: i64) -> Result<Vec<LearnerAttendance>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
