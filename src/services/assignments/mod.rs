pub mod get;
pub mod list;
pub mod review;
pub mod submit;

use crate::authz::Caller;
use crate::errors::Result;
use crate::models::assignments::{
    entities::{Assignment, AssignmentListing, ReviewRecord},
    requests::SubmitAssignmentRequest,
};

use super::ServiceContext;

pub struct AssignmentService {
    ctx: ServiceContext,
}

impl AssignmentService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    // 学员提交作业
    pub async fn submit(&self, caller: &Caller, req: SubmitAssignmentRequest) -> Result<Assignment> {
        submit::submit_assignment(self, caller, req).await
    }

    // 教师批阅
    pub async fn review(
        &self,
        caller: &Caller,
        assignment_id: i64,
        review: ReviewRecord,
    ) -> Result<Assignment> {
        review::review_assignment(self, caller, assignment_id, review).await
    }

    // 教师布置的作业
    pub async fn list_for_instructor(&self, caller: &Caller) -> Result<Vec<AssignmentListing>> {
        list::list_for_instructor(self, caller).await
    }

    // 学员自己的作业
    pub async fn list_for_learner(
        &self,
        caller: &Caller,
        session_id: Option<i64>,
    ) -> Result<Vec<AssignmentListing>> {
        list::list_for_learner(self, caller, session_id).await
    }

    // 获取单个作业（布置教师或提交学员）
    pub async fn get_assignment(&self, caller: &Caller, assignment_id: i64) -> Result<Assignment> {
        get::get_assignment(self, caller, assignment_id).await
    }

    // 下载作业附件，返回文件名与内容
    pub async fn download_attachment(
        &self,
        caller: &Caller,
        assignment_id: i64,
    ) -> Result<(String, Vec<u8>)> {
        get::download_attachment(self, caller, assignment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClassroomError;
    use crate::models::{
        Attachment, accounts::entities::Role, assignments::entities::AssignmentStatus,
    };
    use crate::test_utils::{caller, seed_account, seed_session, setup_test_context};

    fn homework(session_id: i64, title: &str) -> SubmitAssignmentRequest {
        SubmitAssignmentRequest {
            session_id,
            title: title.to_string(),
            description: None,
            attachment: None,
        }
    }

    fn reviewed(grade: &str, feedback: Option<&str>) -> ReviewRecord {
        ReviewRecord {
            status: AssignmentStatus::Reviewed,
            grade: Some(grade.to_string()),
            feedback: feedback.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_submit_requires_enrollment() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &teacher, "Algebra").await;
        let service = ctx.assignments();

        let err = service
            .submit(&learner, homework(session.id, "HW1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));

        let err = service
            .submit(&learner, homework(9999, "HW1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_stamps_instructor_and_clock() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &teacher, "Algebra").await;
        ctx.enrollments().enroll(&learner, session.id).await.unwrap();

        let assignment = ctx
            .assignments()
            .submit(&learner, homework(session.id, "  HW1  "))
            .await
            .unwrap();
        assert_eq!(assignment.instructor_id, teacher.id);
        assert_eq!(assignment.learner_id, learner.account_id);
        assert_eq!(assignment.title, "HW1");
        assert_eq!(assignment.status, AssignmentStatus::Pending);
        assert_eq!(assignment.submitted_at, crate::test_utils::fixed_now());
        assert!(assignment.grade.is_none());
    }

    #[tokio::test]
    async fn test_review_only_by_setting_instructor() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let other = seed_account(&ctx, "other", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &teacher, "Algebra").await;
        ctx.enrollments().enroll(&learner, session.id).await.unwrap();
        let service = ctx.assignments();
        let assignment = service
            .submit(&learner, homework(session.id, "HW1"))
            .await
            .unwrap();

        let err = service
            .review(&caller(&other), assignment.id, reviewed("A", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));

        let err = service
            .review(&learner, assignment.id, reviewed("A", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));

        let err = service
            .review(&caller(&teacher), 9999, reviewed("A", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));

        // 被拒绝的批阅不会写入任何字段
        let unchanged = service
            .get_assignment(&learner, assignment.id)
            .await
            .unwrap();
        assert_eq!(unchanged.status, AssignmentStatus::Pending);
        assert!(unchanged.grade.is_none());
    }

    #[tokio::test]
    async fn test_review_overwrites_but_never_reopens() {
        let ctx = setup_test_context().await;
        let owner = seed_account(&ctx, "teach", Role::Instructor).await;
        let teacher = caller(&owner);
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &owner, "Algebra").await;
        ctx.enrollments().enroll(&learner, session.id).await.unwrap();
        let service = ctx.assignments();
        let assignment = service
            .submit(&learner, homework(session.id, "HW1"))
            .await
            .unwrap();

        let first = service
            .review(&teacher, assignment.id, reviewed("B", Some("ok")))
            .await
            .unwrap();
        assert_eq!(first.grade.as_deref(), Some("B"));

        let second = service
            .review(&teacher, assignment.id, reviewed("A-", None))
            .await
            .unwrap();
        assert_eq!(second.status, AssignmentStatus::Reviewed);
        assert_eq!(second.grade.as_deref(), Some("A-"));
        assert_eq!(second.feedback, None);

        let err = service
            .review(
                &teacher,
                assignment.id,
                ReviewRecord {
                    status: AssignmentStatus::Pending,
                    grade: None,
                    feedback: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
    }

    #[tokio::test]
    async fn test_listings_are_scoped() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let other = seed_account(&ctx, "other", Role::Instructor).await;
        let alice = caller(&seed_account(&ctx, "alice", Role::Learner).await);
        let bob = caller(&seed_account(&ctx, "bob", Role::Learner).await);
        let mine = seed_session(&ctx, &teacher, "Mine").await;
        let theirs = seed_session(&ctx, &other, "Theirs").await;
        let enrollments = ctx.enrollments();
        for (learner, session) in [(&alice, &mine), (&alice, &theirs), (&bob, &mine)] {
            enrollments.enroll(learner, session.id).await.unwrap();
        }
        let service = ctx.assignments();
        service.submit(&alice, homework(mine.id, "A1")).await.unwrap();
        service.submit(&alice, homework(theirs.id, "A2")).await.unwrap();
        service.submit(&bob, homework(mine.id, "B1")).await.unwrap();

        let set_by_teacher = service
            .list_for_instructor(&caller(&teacher))
            .await
            .unwrap();
        assert_eq!(set_by_teacher.len(), 2);
        assert!(set_by_teacher.iter().all(|a| a.assignment.instructor_id == teacher.id));

        let alice_all = service.list_for_learner(&alice, None).await.unwrap();
        assert_eq!(alice_all.len(), 2);
        let alice_mine = service
            .list_for_learner(&alice, Some(mine.id))
            .await
            .unwrap();
        assert_eq!(alice_mine.len(), 1);
        assert_eq!(alice_mine[0].session_title, "Mine");
        assert_eq!(alice_mine[0].learner_name, "alice name");

        let err = service
            .list_for_learner(&bob, Some(theirs.id))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_attachment_download_visibility() {
        let ctx = setup_test_context().await;
        let owner = seed_account(&ctx, "teach", Role::Instructor).await;
        let teacher = caller(&owner);
        let other = caller(&seed_account(&ctx, "other", Role::Instructor).await);
        let alice = caller(&seed_account(&ctx, "alice", Role::Learner).await);
        let bob = caller(&seed_account(&ctx, "bob", Role::Learner).await);
        let session = seed_session(&ctx, &owner, "Essays").await;
        ctx.enrollments().enroll(&alice, session.id).await.unwrap();
        let service = ctx.assignments();

        let mut req = homework(session.id, "Essay");
        req.attachment = Some(Attachment::new("essay.txt", b"once upon a time".to_vec()));
        let assignment = service.submit(&alice, req).await.unwrap();
        assert!(assignment.blob_ref.is_some());

        for viewer in [&teacher, &alice] {
            let (name, bytes) = service
                .download_attachment(viewer, assignment.id)
                .await
                .unwrap();
            assert_eq!(name, "essay.txt");
            assert_eq!(bytes, b"once upon a time");
        }
        for outsider in [&other, &bob] {
            let err = service
                .download_attachment(outsider, assignment.id)
                .await
                .unwrap_err();
            assert!(matches!(err, ClassroomError::Forbidden(_)));
        }

        let plain = service
            .submit(&alice, homework(session.id, "No file"))
            .await
            .unwrap();
        let err = service
            .download_attachment(&alice, plain.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_and_review_end_to_end() {
        let ctx = setup_test_context().await;
        let teacher = seed_account(&ctx, "teach", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &teacher, "S").await;
        let enrollments = ctx.enrollments();

        enrollments.enroll(&learner, session.id).await.unwrap();
        let available = enrollments.list_available_sessions(&learner).await.unwrap();
        assert!(available.iter().all(|s| s.session.id != session.id));

        let service = ctx.assignments();
        let hw = service
            .submit(&learner, homework(session.id, "HW1"))
            .await
            .unwrap();
        service
            .review(&caller(&teacher), hw.id, reviewed("A", None))
            .await
            .unwrap();

        let rows = service.list_for_learner(&learner, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].assignment.title, "HW1");
        assert_eq!(rows[0].assignment.grade.as_deref(), Some("A"));
        assert_eq!(rows[0].assignment.status, AssignmentStatus::Reviewed);
    }
}
