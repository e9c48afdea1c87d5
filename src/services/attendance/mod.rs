pub mod history;
pub mod record;
pub mod sheet;

use chrono::NaiveDate;

use crate::authz::Caller;
use crate::errors::Result;
use crate::models::attendance::{
    entities::{AttendanceSheetRow, LearnerAttendance},
    requests::RecordAttendanceRequest,
};

use super::ServiceContext;

pub struct AttendanceService {
    ctx: ServiceContext,
}

impl AttendanceService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    // 记录考勤（整日替换），返回写入行数
    pub async fn record(
        &self,
        caller: &Caller,
        session_id: i64,
        req: RecordAttendanceRequest,
    ) -> Result<usize> {
        record::record_attendance(self, caller, session_id, req).await
    }

    // 指定日期的考勤表
    pub async fn sheet(
        &self,
        caller: &Caller,
        session_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceSheetRow>> {
        sheet::attendance_sheet(self, caller, session_id, date).await
    }

    // 今日考勤表
    pub async fn today_view(
        &self,
        caller: &Caller,
        session_id: i64,
    ) -> Result<Vec<AttendanceSheetRow>> {
        let today = self.ctx.clock().today();
        sheet::attendance_sheet(self, caller, session_id, today).await
    }

    // 学员考勤历史
    pub async fn learner_history(&self, caller: &Caller) -> Result<Vec<LearnerAttendance>> {
        history::learner_history(self, caller).await
    }
}
