use crate::models::Attachment;

// 上传资料，标题缺省取文件名
#[derive(Debug, Clone)]
pub struct AddMaterialRequest {
    pub title: Option<String>,
    pub attachment: Attachment,
}
