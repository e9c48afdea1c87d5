use super::{Access, SessionService, find_session, owned_session, require_enrollment};
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::Result;
use crate::models::{
    accounts::entities::Role,
    sessions::{
        entities::SessionListing,
        responses::{InstructorSessionView, LearnerSessionView},
    },
};

pub async fn instructor_view(
    service: &SessionService,
    caller: &Caller,
    session_id: i64,
) -> Result<InstructorSessionView> {
    let ctx = service.ctx();
    let session = owned_session(ctx, caller, session_id, Access::Read).await?;

    let learners = ctx.storage().list_enrolled_learners(session.id).await?;
    let materials = ctx.storage().list_materials(session.id).await?;

    Ok(InstructorSessionView {
        session,
        learners,
        materials,
    })
}

pub async fn learner_view(
    service: &SessionService,
    caller: &Caller,
    session_id: i64,
) -> Result<LearnerSessionView> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;

    let ctx = service.ctx();
    let session = find_session(ctx, session_id).await?;
    require_enrollment(ctx, caller, session_id).await?;

    let instructor_name = ctx
        .storage()
        .get_account_by_id(session.instructor_id)
        .await?
        .map(|account| account.full_name)
        .unwrap_or_default();
    let materials = ctx.storage().list_materials(session_id).await?;
    let assignments = ctx
        .storage()
        .list_assignments_by_learner(caller.account_id, Some(session_id))
        .await?
        .into_iter()
        .map(|listing| listing.assignment)
        .collect();

    Ok(LearnerSessionView {
        session: SessionListing {
            session,
            instructor_name,
        },
        materials,
        assignments,
    })
}
