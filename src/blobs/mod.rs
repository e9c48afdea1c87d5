//! 附件存储能力
//!
//! 业务层只依赖 [`BlobStore`]：写入返回引用，按引用读取。
//! 引用形如 `namespace/uuid/file_name`，存入数据库。

mod local;
mod memory;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::UploadConfig;
use crate::errors::Result;

/// 附件引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(String);

impl BlobRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 引用末段即原始文件名
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for BlobRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 附件命名空间
pub mod namespaces {
    pub const ASSIGNMENTS: &str = "assignments";
    pub const MATERIALS: &str = "materials";
}

#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// 写入附件，返回引用
    async fn put(&self, namespace: &str, file_name: &str, bytes: &[u8]) -> Result<BlobRef>;
    /// 读取附件，不存在返回 NotFound
    async fn get(&self, blob_ref: &BlobRef) -> Result<Vec<u8>>;
}

/// 生成附件键：命名空间 / uuid / 清洗后的文件名
pub(crate) fn blob_key(namespace: &str, file_name: &str) -> String {
    let name = crate::utils::sanitize_file_name(file_name);
    format!("{namespace}/{}/{name}", uuid::Uuid::new_v4())
}

pub async fn create_blob_store(config: &UploadConfig) -> Result<Arc<dyn BlobStore>> {
    let store = LocalBlobStore::new(&config.dir, config.max_size).await?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_ref_file_name() {
        let blob_ref = BlobRef::new("materials/0b1c/notes.pdf");
        assert_eq!(blob_ref.file_name(), "notes.pdf");
        assert_eq!(BlobRef::new("plain").file_name(), "plain");
    }

    #[test]
    fn test_blob_key_sanitizes_name() {
        let key = blob_key(namespaces::ASSIGNMENTS, "../../etc/passwd");
        assert!(key.starts_with("assignments/"));
        assert!(!key.contains(".."));
        assert_eq!(BlobRef::new(key).file_name(), "passwd");
    }
}
