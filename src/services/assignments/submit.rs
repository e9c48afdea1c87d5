use tracing::info;

use super::AssignmentService;
use crate::authz::{Caller, Ownership, authorize};
use crate::blobs::namespaces;
use crate::errors::Result;
use crate::models::{
    accounts::entities::Role,
    assignments::{
        entities::{Assignment, NewAssignment},
        requests::SubmitAssignmentRequest,
    },
};
use crate::services::sessions::{find_session, require_enrollment};
use crate::utils::validate::{optional_text, require_text};

/// 提交作业：要求已选该场次，布置教师取场次属主
pub async fn submit_assignment(
    service: &AssignmentService,
    caller: &Caller,
    req: SubmitAssignmentRequest,
) -> Result<Assignment> {
    authorize(caller, Role::learner_roles(), Ownership::Unscoped)?;
    let title = require_text("title", &req.title)?;

    let ctx = service.ctx();
    let session = find_session(ctx, req.session_id).await?;
    require_enrollment(ctx, caller, session.id).await?;

    let blob_ref = match req.attachment {
        Some(attachment) => Some(
            ctx.blobs()
                .put(
                    namespaces::ASSIGNMENTS,
                    &attachment.file_name,
                    &attachment.bytes,
                )
                .await?
                .into_string(),
        ),
        None => None,
    };

    let assignment = ctx
        .storage()
        .create_assignment(NewAssignment {
            session_id: session.id,
            learner_id: caller.account_id,
            instructor_id: session.instructor_id,
            title,
            description: optional_text(req.description),
            blob_ref,
            submitted_at: ctx.clock().now().timestamp(),
        })
        .await?;

    info!(
        "Assignment {} submitted by learner {} for session {}",
        assignment.id, caller.account_id, session.id
    );
    Ok(assignment)
}
