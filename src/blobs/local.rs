use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use super::{BlobRef, BlobStore, blob_key};
use crate::errors::{ClassroomError, Result};

/// 校验附件键只包含普通路径段，拼接后仍位于根目录下
fn ensure_within(base: &Path, key: &str) -> Result<PathBuf> {
    let mut resolved = base.to_path_buf();
    for component in Path::new(key).components() {
        match component {
            Component::Normal(c) => resolved.push(c),
            _ => {
                return Err(ClassroomError::validation(format!(
                    "非法的附件路径: {key}"
                )));
            }
        }
    }
    if resolved == base || !resolved.starts_with(base) {
        return Err(ClassroomError::validation(format!("非法的附件路径: {key}")));
    }
    Ok(resolved)
}

/// 本地文件系统附件存储
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
    max_size: usize,
}

impl LocalBlobStore {
    pub async fn new(base_path: impl AsRef<Path>, max_size: usize) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).await.map_err(|e| {
            ClassroomError::file_operation(format!(
                "创建附件目录失败 '{}': {e}",
                base_path.display()
            ))
        })?;

        info!("附件存储初始化完成，目录: {}", base_path.display());

        Ok(Self {
            base_path,
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, namespace: &str, file_name: &str, bytes: &[u8]) -> Result<BlobRef> {
        if bytes.len() > self.max_size {
            return Err(ClassroomError::validation(format!(
                "文件大小超过限制: {} > {}",
                bytes.len(),
                self.max_size
            )));
        }

        let key = blob_key(namespace, file_name);
        let path = ensure_within(&self.base_path, &key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| ClassroomError::file_operation(format!("写入附件失败 {key}: {e}")))?;

        debug!("Stored blob {} ({} bytes)", key, bytes.len());
        Ok(BlobRef::new(key))
    }

    async fn get(&self, blob_ref: &BlobRef) -> Result<Vec<u8>> {
        let path = ensure_within(&self.base_path, blob_ref.as_str())?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ClassroomError::not_found(
                format!("附件不存在: {blob_ref}"),
            )),
            Err(e) => Err(ClassroomError::file_operation(format!(
                "读取附件失败 {blob_ref}: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), 1024).await.unwrap();

        let blob_ref = store.put("materials", "week 1.pdf", b"slides").await.unwrap();
        assert!(blob_ref.as_str().starts_with("materials/"));
        assert_eq!(store.get(&blob_ref).await.unwrap(), b"slides".to_vec());
    }

    #[tokio::test]
    async fn test_rejects_traversal_refs() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), 1024).await.unwrap();

        let err = store.get(&BlobRef::new("../secret")).await.unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
        let err = store.get(&BlobRef::new("/etc/passwd")).await.unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), 1024).await.unwrap();

        let err = store
            .get(&BlobRef::new("materials/none/missing.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rejects_oversized_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), 4).await.unwrap();

        let err = store.put("materials", "big.bin", b"12345").await.unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
    }
}
