use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub session_id: i64,
}
