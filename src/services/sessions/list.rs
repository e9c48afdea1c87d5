use super::SessionService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::Result;
use crate::models::{
    accounts::entities::Role,
    sessions::entities::{Session, SessionListing},
};

pub async fn list_own_sessions(service: &SessionService, caller: &Caller) -> Result<Vec<Session>> {
    authorize(caller, Role::instructor_roles(), Ownership::Unscoped)?;
    service
        .ctx()
        .storage()
        .list_sessions_by_instructor(caller.account_id)
        .await
}

pub async fn list_all_sessions(
    service: &SessionService,
    caller: &Caller,
) -> Result<Vec<SessionListing>> {
    authorize(caller, Role::admin_roles(), Ownership::Unscoped)?;
    service.ctx().storage().list_sessions_with_instructor().await
}
