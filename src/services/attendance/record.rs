use std::collections::HashSet;

use tracing::info;

use super::AttendanceService;
use crate::authz::Caller;
use crate::errors::{ClassroomError, Result};
use crate::models::attendance::requests::RecordAttendanceRequest;
use crate::services::sessions::{Access, owned_session};

/// 记录考勤：属主教师整日替换，条目中的学员必须都已选课
pub async fn record_attendance(
    service: &AttendanceService,
    caller: &Caller,
    session_id: i64,
    req: RecordAttendanceRequest,
) -> Result<usize> {
    let ctx = service.ctx();
    let session = owned_session(ctx, caller, session_id, Access::Write).await?;

    let enrolled: HashSet<i64> = ctx
        .storage()
        .list_enrolled_learners(session.id)
        .await?
        .into_iter()
        .map(|learner| learner.id)
        .collect();

    let strangers: Vec<String> = req
        .entries
        .keys()
        .filter(|id| !enrolled.contains(*id))
        .map(|id| id.to_string())
        .collect();
    if !strangers.is_empty() {
        return Err(ClassroomError::validation(format!(
            "learners not enrolled in session {}: {}",
            session.id,
            strangers.join(", ")
        )));
    }

    let date = req.date.unwrap_or_else(|| ctx.clock().today());
    let written = ctx
        .storage()
        .replace_attendance(session.id, date, &req.entries, ctx.clock().now().timestamp())
        .await?;

    info!(
        "Attendance for session {} on {} recorded by instructor {} ({} rows)",
        session.id, date, caller.account_id, written
    );
    Ok(written)
}
