use serde::{Deserialize, Serialize};

// 作业状态，仅允许 pending -> reviewed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,  // 待批阅
    Reviewed, // 已批阅
}

impl AssignmentStatus {
    /// 状态迁移是否合法（允许重复批阅，不允许退回 pending）
    pub fn can_transition_to(self, next: AssignmentStatus) -> bool {
        !matches!(
            (self, next),
            (AssignmentStatus::Reviewed, AssignmentStatus::Pending)
        )
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "pending"),
            AssignmentStatus::Reviewed => write!(f, "reviewed"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "reviewed" => Ok(AssignmentStatus::Reviewed),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub session_id: i64,
    pub learner_id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub blob_ref: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub status: AssignmentStatus,
    pub grade: Option<String>,
    pub feedback: Option<String>,
}

// 附带场次标题与学员姓名的作业
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentListing {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub session_title: String,
    pub learner_name: String,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub session_id: i64,
    pub learner_id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub blob_ref: Option<String>,
    pub submitted_at: i64,
}

// 批阅结果，一次写入
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewRecord {
    pub status: AssignmentStatus,
    pub grade: Option<String>,
    pub feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use AssignmentStatus::*;
        assert!(Pending.can_transition_to(Reviewed));
        assert!(Pending.can_transition_to(Pending));
        assert!(Reviewed.can_transition_to(Reviewed));
        assert!(!Reviewed.can_transition_to(Pending));
    }
}
