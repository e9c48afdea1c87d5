use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::Excused => write!(f, "excused"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            "excused" => Ok(AttendanceStatus::Excused),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub session_id: i64,
    pub learner_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 某日考勤表中的一行：已选学员 + 当日状态（未记录则为空）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceSheetRow {
    pub learner_id: i64,
    pub username: String,
    pub full_name: String,
    pub status: Option<AttendanceStatus>,
}

// 学员的考勤历史
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearnerAttendance {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub session_title: String,
    pub instructor_name: String,
}
