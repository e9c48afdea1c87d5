use tracing::info;

use super::SessionService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    accounts::entities::Role,
    sessions::{
        entities::{NewSession, Session},
        requests::CreateSessionRequest,
    },
};
use crate::utils::validate::{optional_text, require_text};

pub async fn create_session(
    service: &SessionService,
    caller: &Caller,
    req: CreateSessionRequest,
) -> Result<Session> {
    authorize(caller, Role::instructor_roles(), Ownership::Unscoped)?;

    let ctx = service.ctx();

    // 以存储中的角色为准
    let is_instructor = ctx
        .storage()
        .get_account_by_id(caller.account_id)
        .await?
        .is_some_and(|account| account.role == Role::Instructor);
    if !is_instructor {
        return Err(ClassroomError::unauthorized(format!(
            "account {} is not an instructor",
            caller.account_id
        )));
    }

    let title = require_text("title", &req.title)?;

    let session = ctx
        .storage()
        .create_session(NewSession {
            title,
            description: optional_text(req.description),
            instructor_id: caller.account_id,
            scheduled_at: req.scheduled_at.timestamp(),
            meeting_ref: optional_text(req.meeting_ref),
            created_at: ctx.clock().now().timestamp(),
        })
        .await?;

    info!(
        "Session {} '{}' created by instructor {}",
        session.id, session.title, caller.account_id
    );
    Ok(session)
}
