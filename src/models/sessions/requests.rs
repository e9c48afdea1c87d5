use serde::Deserialize;

// 场次创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub meeting_ref: Option<String>,
}
