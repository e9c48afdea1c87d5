use chrono::NaiveDate;

use super::AttendanceService;
use crate::authz::Caller;
use crate::errors::Result;
use crate::models::attendance::entities::AttendanceSheetRow;
use crate::services::sessions::{Access, owned_session};

pub async fn attendance_sheet(
    service: &AttendanceService,
    caller: &Caller,
    session_id: i64,
    date: NaiveDate,
) -> Result<Vec<AttendanceSheetRow>> {
    let ctx = service.ctx();
    let session = owned_session(ctx, caller, session_id, Access::Read).await?;
    ctx.storage().attendance_sheet(session.id, date).await
}
