use serde::{Deserialize, Serialize};

// 课程资料，只追加
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: i64,
    pub session_id: i64,
    pub title: String,
    pub blob_ref: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub session_id: i64,
    pub title: String,
    pub blob_ref: String,
    pub uploaded_at: i64,
}
