use super::AssignmentService;
use crate::authz::{Caller, Ownership, authorize};
use crate::blobs::BlobRef;
use crate::errors::{ClassroomError, Result};
use crate::models::{accounts::entities::Role, assignments::entities::Assignment};

pub async fn get_assignment(
    service: &AssignmentService,
    caller: &Caller,
    assignment_id: i64,
) -> Result<Assignment> {
    authorize(caller, &[Role::Instructor, Role::Learner], Ownership::Unscoped)?;

    let assignment = service
        .ctx()
        .storage()
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("assignment {assignment_id}")))?;

    // 教师看自己布置的，学员看自己提交的
    let owner = match caller.role {
        Role::Instructor => assignment.instructor_id,
        _ => assignment.learner_id,
    };
    authorize(caller, &[caller.role], Ownership::OwnedBy(owner))?;

    Ok(assignment)
}

pub async fn download_attachment(
    service: &AssignmentService,
    caller: &Caller,
    assignment_id: i64,
) -> Result<(String, Vec<u8>)> {
    let assignment = get_assignment(service, caller, assignment_id).await?;

    let blob_ref = assignment
        .blob_ref
        .map(BlobRef::new)
        .ok_or_else(|| ClassroomError::not_found(format!("assignment {assignment_id} has no attachment")))?;

    let bytes = service.ctx().blobs().get(&blob_ref).await?;
    Ok((blob_ref.file_name().to_string(), bytes))
}
