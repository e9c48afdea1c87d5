use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::AttendanceStatus;

// 记录考勤：学员ID -> 状态，缺省日期为今天
#[derive(Debug, Clone, Deserialize)]
pub struct RecordAttendanceRequest {
    pub date: Option<NaiveDate>,
    pub entries: BTreeMap<i64, AttendanceStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceSheetParams {
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_parse_from_json_object() {
        let req: RecordAttendanceRequest = serde_json::from_str(
            r#"{"date":"2025-03-01","entries":{"7":"present","9":"late"}}"#,
        )
        .unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(req.entries.get(&7), Some(&AttendanceStatus::Present));
        assert_eq!(req.entries.get(&9), Some(&AttendanceStatus::Late));
    }
}
