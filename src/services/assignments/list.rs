use super::AssignmentService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::Result;
use crate::models::{accounts::entities::Role, assignments::entities::AssignmentListing};
use crate::services::sessions::require_enrollment;

pub async fn list_for_instructor(
    service: &AssignmentService,
    caller: &Caller,
) -> Result<Vec<AssignmentListing>> {
    authorize(caller, Role::instructor_roles(), Ownership::Unscoped)?;
    service
        .ctx()
        .storage()
        .list_assignments_by_instructor(caller.account_id)
        .await
}

pub async fn list_for_learner(
    service: &AssignmentService,
    caller: &Caller,
    session_id: Option<i64>,
) -> Result<Vec<AssignmentListing>> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;

    let ctx = service.ctx();
    if let Some(session_id) = session_id {
        require_enrollment(ctx, caller, session_id).await?;
    }

    ctx.storage()
        .list_assignments_by_learner(caller.account_id, session_id)
        .await
}
