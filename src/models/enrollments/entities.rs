use serde::{Deserialize, Serialize};

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: i64,
    pub learner_id: i64,
    pub session_id: i64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
