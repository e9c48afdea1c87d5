//! multipart 表单解析：文本字段 + 至多一个 `file` 字段

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use crate::errors::{ClassroomError, Result};
use crate::models::Attachment;

const FILE_FIELD: &str = "file";

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<Attachment>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// 必填的整数字段
    pub fn required_i64(&self, name: &str) -> Result<i64> {
        self.fields
            .get(name)
            .ok_or_else(|| ClassroomError::validation(format!("{name} is required")))?
            .trim()
            .parse::<i64>()
            .map_err(|_| ClassroomError::validation(format!("{name} must be an integer")))
    }
}

pub async fn read_multipart(mut payload: Multipart, max_size: usize) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ClassroomError::validation(format!("Invalid multipart payload: {e}")))?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| ClassroomError::validation(format!("Invalid multipart payload: {e}")))?;
            data.extend_from_slice(&chunk);
            // 校验大小
            if data.len() > max_size {
                return Err(ClassroomError::validation(format!(
                    "field {name} exceeds the {max_size} byte limit"
                )));
            }
        }

        if name == FILE_FIELD {
            if form.file.is_some() {
                return Err(ClassroomError::validation(
                    "Only one file can be uploaded at a time",
                ));
            }
            let file_name = file_name
                .filter(|n| !n.trim().is_empty())
                .ok_or_else(|| ClassroomError::validation("file name is required"))?;
            form.file = Some(Attachment::new(file_name, data));
        } else {
            let value = String::from_utf8(data)
                .map_err(|_| ClassroomError::validation(format!("field {name} is not UTF-8")))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
