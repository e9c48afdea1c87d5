use serde::{Deserialize, Serialize};

// 场次状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled, // 已排期
    Completed, // 已结束
    Cancelled, // 已取消
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Scheduled => write!(f, "scheduled"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            _ => Err(format!("Invalid session status: {s}")),
        }
    }
}

// 课程场次实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub meeting_ref: Option<String>,
    pub status: SessionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 附带教师姓名的场次
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionListing {
    #[serde(flatten)]
    pub session: Session,
    pub instructor_name: String,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    pub scheduled_at: i64,
    pub meeting_ref: Option<String>,
    pub created_at: i64,
}
