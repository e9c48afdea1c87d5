use tracing::info;

use super::EnrollmentService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    accounts::entities::Role, enrollments::entities::Enrollment,
    sessions::entities::SessionStatus,
};

/// 选课
///
/// 重复选课由唯一索引拒绝（AlreadyEnrolled），场次不存在由外键拒绝（Validation），
/// 只有已排期的场次可选。
pub async fn enroll(
    service: &EnrollmentService,
    caller: &Caller,
    session_id: i64,
) -> Result<Enrollment> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;

    let ctx = service.ctx();
    if let Some(session) = ctx.storage().get_session_by_id(session_id).await?
        && session.status != SessionStatus::Scheduled
    {
        return Err(ClassroomError::validation(format!(
            "session {session_id} is {} and cannot be enrolled",
            session.status
        )));
    }

    let enrollment = ctx
        .storage()
        .create_enrollment(
            caller.account_id,
            session_id,
            ctx.clock().now().timestamp(),
        )
        .await?;

    info!(
        "Learner {} enrolled in session {}",
        caller.account_id, session_id
    );
    Ok(enrollment)
}
