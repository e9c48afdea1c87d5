use super::EnrollmentService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::Result;
use crate::models::{
    accounts::entities::{Account, Role},
    sessions::entities::SessionListing,
};
use crate::services::sessions::{Access, owned_session};

pub async fn list_enrolled_sessions(
    service: &EnrollmentService,
    caller: &Caller,
) -> Result<Vec<SessionListing>> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;
    service
        .ctx()
        .storage()
        .list_enrolled_sessions(caller.account_id)
        .await
}

pub async fn list_available_sessions(
    service: &EnrollmentService,
    caller: &Caller,
) -> Result<Vec<SessionListing>> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;
    service
        .ctx()
        .storage()
        .list_available_sessions(caller.account_id)
        .await
}

pub async fn list_enrolled_learners(
    service: &EnrollmentService,
    caller: &Caller,
    session_id: i64,
) -> Result<Vec<Account>> {
    let ctx = service.ctx();
    let session = owned_session(ctx, caller, session_id, Access::Read).await?;
    ctx.storage().list_enrolled_learners(session.id).await
}
