use tracing::info;

use super::AssignmentService;
use crate::authz::{Caller, Ownership, authorize};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    accounts::entities::Role,
    assignments::entities::{Assignment, ReviewRecord},
};
use crate::utils::validate::optional_text;

/// 批阅作业：只有布置教师可以写入成绩与评语，不允许退回 pending
pub async fn review_assignment(
    service: &AssignmentService,
    caller: &Caller,
    assignment_id: i64,
    review: ReviewRecord,
) -> Result<Assignment> {
    authorize(caller, Role::instructor_roles(), Ownership::Unscoped)?;

    let ctx = service.ctx();
    let assignment = ctx
        .storage()
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("assignment {assignment_id}")))?;

    authorize(
        caller,
        Role::instructor_roles(),
        Ownership::OwnedBy(assignment.instructor_id),
    )?;

    if !assignment.status.can_transition_to(review.status) {
        return Err(ClassroomError::validation(format!(
            "assignment {assignment_id} cannot move from {} to {}",
            assignment.status, review.status
        )));
    }

    let record = ReviewRecord {
        status: review.status,
        grade: optional_text(review.grade),
        feedback: optional_text(review.feedback),
    };

    let updated = ctx
        .storage()
        .review_assignment(assignment_id, caller.account_id, record)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("assignment {assignment_id}")))?;

    info!(
        "Assignment {} reviewed by instructor {} ({})",
        updated.id, caller.account_id, updated.status
    );
    Ok(updated)
}
