use dashmap::DashMap;

use super::{BlobRef, BlobStore, blob_key};
use crate::errors::{ClassroomError, Result};

/// 内存附件存储，用于测试与临时部署
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, namespace: &str, file_name: &str, bytes: &[u8]) -> Result<BlobRef> {
        let key = blob_key(namespace, file_name);
        self.blobs.insert(key.clone(), bytes.to_vec());
        Ok(BlobRef::new(key))
    }

    async fn get(&self, blob_ref: &BlobRef) -> Result<Vec<u8>> {
        self.blobs
            .get(blob_ref.as_str())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ClassroomError::not_found(format!("附件不存在: {blob_ref}")))
    }
}
