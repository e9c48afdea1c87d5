use super::AttendanceService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::Result;
use crate::models::{accounts::entities::Role, attendance::entities::LearnerAttendance};

pub async fn learner_history(
    service: &AttendanceService,
    caller: &Caller,
) -> Result<Vec<LearnerAttendance>> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;
    service
        .ctx()
        .storage()
        .list_attendance_by_learner(caller.account_id)
        .await
}
