pub mod enroll;
pub mod list;

use crate::authz::Caller;
use crate::errors::Result;
use crate::models::{
    accounts::entities::Account, enrollments::entities::Enrollment,
    sessions::entities::SessionListing,
};

use super::ServiceContext;

pub struct EnrollmentService {
    ctx: ServiceContext,
}

impl EnrollmentService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    // 学员选课
    pub async fn enroll(&self, caller: &Caller, session_id: i64) -> Result<Enrollment> {
        enroll::enroll(self, caller, session_id).await
    }

    // 学员已选场次
    pub async fn list_enrolled_sessions(&self, caller: &Caller) -> Result<Vec<SessionListing>> {
        list::list_enrolled_sessions(self, caller).await
    }

    // 学员可选场次
    pub async fn list_available_sessions(&self, caller: &Caller) -> Result<Vec<SessionListing>> {
        list::list_available_sessions(self, caller).await
    }

    // 场次已选学员（属主教师）
    pub async fn list_enrolled_learners(
        &self,
        caller: &Caller,
        session_id: i64,
    ) -> Result<Vec<Account>> {
        list::list_enrolled_learners(self, caller, session_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ClassroomError;
    use crate::models::accounts::entities::Role;
    use crate::models::sessions::entities::SessionStatus;
    use crate::test_utils::{
        caller, seed_account, seed_session, set_session_status, setup_test_context,
        setup_test_context_with_db,
    };

    #[tokio::test]
    async fn test_double_enrollment_rejected() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &teacher, "History").await;
        let service = ctx.enrollments();

        service.enroll(&learner, session.id).await.unwrap();
        let err = service.enroll(&learner, session.id).await.unwrap_err();
        assert!(matches!(err, ClassroomError::AlreadyEnrolled(_)));

        let enrolled = service.list_enrolled_sessions(&learner).await.unwrap();
        assert_eq!(enrolled.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_enrollment_has_one_winner() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &teacher, "History").await;
        let first = ctx.enrollments();
        let second = ctx.enrollments();

        let (a, b) = tokio::join!(
            first.enroll(&learner, session.id),
            second.enroll(&learner, session.id)
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let failure = a.err().or(b.err()).unwrap();
        assert!(matches!(failure, ClassroomError::AlreadyEnrolled(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_is_validation_error() {
        let ctx = setup_test_context().await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let err = ctx.enrollments().enroll(&learner, 4242).await.unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
    }

    #[tokio::test]
    async fn test_only_learners_enroll() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let session = seed_session(&ctx, &teacher, "History").await;
        let err = ctx
            .enrollments()
            .enroll(&caller(&teacher), session.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_available_sessions_exclude_enrolled_and_closed() {
        let (ctx, db) = setup_test_context_with_db().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let joined = seed_session(&ctx, &teacher, "Joined").await;
        let open = seed_session(&ctx, &teacher, "Open").await;
        let cancelled = seed_session(&ctx, &teacher, "Cancelled").await;
        let service = ctx.enrollments();

        service.enroll(&learner, joined.id).await.unwrap();
        set_session_status(&db, cancelled.id, SessionStatus::Cancelled).await;

        let available: Vec<i64> = service
            .list_available_sessions(&learner)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.session.id)
            .collect();
        assert_eq!(available, vec![open.id]);

        let err = service.enroll(&learner, cancelled.id).await.unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
    }

    #[tokio::test]
    async fn test_enrolled_learners_visible_to_owner_only() {
        let ctx = setup_test_context().await;
        let owner = seed_account(&ctx, "owner", Role::Instructor).await;
        let other = seed_account(&ctx, "other", Role::Instructor).await;
        let learner = seed_account(&ctx, "learn", Role::Learner).await;
        let session = seed_session(&ctx, &owner, "Art").await;
        let service = ctx.enrollments();
        service.enroll(&caller(&learner), session.id).await.unwrap();

        let learners = service
            .list_enrolled_learners(&caller(&owner), session.id)
            .await
            .unwrap();
        assert_eq!(learners.len(), 1);

        let err = service
            .list_enrolled_learners(&caller(&other), session.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));
    }
}
