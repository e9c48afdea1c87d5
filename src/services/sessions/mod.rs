pub mod create;
pub mod list;
pub mod view;

use crate::authz::{Caller, Ownership, authorize};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    accounts::entities::Role,
    sessions::{
        entities::{Session, SessionListing},
        requests::CreateSessionRequest,
        responses::{InstructorSessionView, LearnerSessionView},
    },
};

use super::ServiceContext;

/// 归属检查的访问类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// 读：非属主看不到该场次（NotFound）
    Read,
    /// 写：非属主被拒绝（Forbidden）
    Write,
}

pub(crate) async fn find_session(ctx: &ServiceContext, session_id: i64) -> Result<Session> {
    ctx.storage()
        .get_session_by_id(session_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("session {session_id}")))
}

/// 加载调用教师拥有的场次
pub(crate) async fn owned_session(
    ctx: &ServiceContext,
    caller: &Caller,
    session_id: i64,
    access: Access,
) -> Result<Session> {
    authorize(caller, Role::instructor_roles(), Ownership::Unscoped)?;

    let session = find_session(ctx, session_id).await?;
    if access == Access::Read && session.instructor_id != caller.account_id {
        return Err(ClassroomError::not_found(format!("session {session_id}")));
    }

    authorize(
        caller,
        Role::instructor_roles(),
        Ownership::OwnedBy(session.instructor_id),
    )?;
    Ok(session)
}

/// 要求调用学员已选该场次
pub(crate) async fn require_enrollment(
    ctx: &ServiceContext,
    caller: &Caller,
    session_id: i64,
) -> Result<()> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;
    let enrolled = ctx
        .storage()
        .get_enrollment(caller.account_id, session_id)
        .await?
        .is_some();
    authorize(caller, Role::learner_roles(), Ownership::Enrolled(enrolled))
}

pub struct SessionService {
    ctx: ServiceContext,
}

impl SessionService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    // 创建场次（教师）
    pub async fn create_session(
        &self,
        caller: &Caller,
        req: CreateSessionRequest,
    ) -> Result<Session> {
        create::create_session(self, caller, req).await
    }

    // 教师自己的场次
    pub async fn list_own_sessions(&self, caller: &Caller) -> Result<Vec<Session>> {
        list::list_own_sessions(self, caller).await
    }

    // 获取教师拥有的场次
    pub async fn get_owned_session(&self, caller: &Caller, session_id: i64) -> Result<Session> {
        owned_session(&self.ctx, caller, session_id, Access::Read).await
    }

    // 全部场次（管理员）
    pub async fn list_all_sessions(&self, caller: &Caller) -> Result<Vec<SessionListing>> {
        list::list_all_sessions(self, caller).await
    }

    // 教师视角详情
    pub async fn instructor_view(
        &self,
        caller: &Caller,
        session_id: i64,
    ) -> Result<InstructorSessionView> {
        view::instructor_view(self, caller, session_id).await
    }

    // 学员视角详情
    pub async fn learner_view(
        &self,
        caller: &Caller,
        session_id: i64,
    ) -> Result<LearnerSessionView> {
        view::learner_view(self, caller, session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{caller, fixed_now, seed_account, seed_session, setup_test_context};
    use chrono::Duration;

    fn session_req(title: &str, hours_from_now: i64) -> CreateSessionRequest {
        CreateSessionRequest {
            title: title.to_string(),
            description: Some("  ".to_string()),
            scheduled_at: fixed_now() + Duration::hours(hours_from_now),
            meeting_ref: Some("https://meet.example/abc".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_session_defaults_to_scheduled() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;

        let session = ctx
            .sessions()
            .create_session(&caller(&teacher), session_req("Geometry", 2))
            .await
            .unwrap();
        assert_eq!(session.instructor_id, teacher.id);
        assert_eq!(
            session.status,
            crate::models::sessions::entities::SessionStatus::Scheduled
        );
        assert_eq!(session.description, None);
    }

    #[tokio::test]
    async fn test_create_session_requires_instructor() {
        let ctx = setup_test_context().await;
        let learner = seed_account(&ctx, "learn", Role::Learner).await;
        let err = ctx
            .sessions()
            .create_session(&caller(&learner), session_req("Nope", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));

        // 令牌声称是教师，但存储中的账号不是
        let forged = Caller::new(learner.id, Role::Instructor);
        let err = ctx
            .sessions()
            .create_session(&forged, session_req("Nope", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_create_session_requires_title() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let err = ctx
            .sessions()
            .create_session(&caller(&teacher), session_req("   ", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
    }

    #[tokio::test]
    async fn test_own_sessions_sorted_by_schedule() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let other = seed_account(&ctx, "other", Role::Instructor).await;
        let service = ctx.sessions();

        service
            .create_session(&caller(&teacher), session_req("Later", 48))
            .await
            .unwrap();
        service
            .create_session(&caller(&teacher), session_req("Sooner", 1))
            .await
            .unwrap();
        service
            .create_session(&caller(&other), session_req("Theirs", 5))
            .await
            .unwrap();

        let titles: Vec<String> = service
            .list_own_sessions(&caller(&teacher))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
    }

    #[tokio::test]
    async fn test_get_owned_hides_foreign_sessions() {
        let ctx = setup_test_context().await;
        let owner = seed_account(&ctx, "owner", Role::Instructor).await;
        let other = seed_account(&ctx, "other", Role::Instructor).await;
        let session = seed_session(&ctx, &owner, "Physics").await;
        let service = ctx.sessions();

        assert_eq!(
            service
                .get_owned_session(&caller(&owner), session.id)
                .await
                .unwrap()
                .id,
            session.id
        );
        let err = service
            .get_owned_session(&caller(&other), session.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));
        let err = service
            .get_owned_session(&caller(&owner), 9999)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_all_sessions_for_admin() {
        let ctx = setup_test_context().await;
        let admin = seed_account(&ctx, "root", Role::Admin).await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        seed_session(&ctx, &teacher, "Chemistry").await;
        let service = ctx.sessions();

        let all = service.list_all_sessions(&caller(&admin)).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].instructor_name, "teach name");

        let err = service
            .list_all_sessions(&caller(&teacher))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_session_views() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let learner = seed_account(&ctx, "learn", Role::Learner).await;
        let outsider = seed_account(&ctx, "out", Role::Learner).await;
        let session = seed_session(&ctx, &teacher, "Biology").await;
        ctx.enrollments()
            .enroll(&caller(&learner), session.id)
            .await
            .unwrap();
        let service = ctx.sessions();

        let view = service
            .instructor_view(&caller(&teacher), session.id)
            .await
            .unwrap();
        assert_eq!(view.learners.len(), 1);
        assert_eq!(view.learners[0].id, learner.id);

        let view = service
            .learner_view(&caller(&learner), session.id)
            .await
            .unwrap();
        assert_eq!(view.session.instructor_name, "teach name");
        assert!(view.materials.is_empty());

        let err = service
            .learner_view(&caller(&outsider), session.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));
    }
}
