use serde::Deserialize;

use crate::models::Attachment;

// 学员提交作业（附件由 multipart 解析）
#[derive(Debug, Clone)]
pub struct SubmitAssignmentRequest {
    pub session_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub attachment: Option<Attachment>,
}

// 作业列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentListParams {
    pub session_id: Option<i64>,
}
