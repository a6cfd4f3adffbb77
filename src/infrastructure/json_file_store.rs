//! JSON 文件存储 - 基础设施层
//!
//! 每个作业保存为 `{output_folder}/{id}.json`

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::StoreError;
use crate::infrastructure::AssignmentStore;
use crate::models::{AssignmentPayload, StoredAssignment};

/// 本地 JSON 文件存储
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    folder: PathBuf,
    // 同一毫秒内多次保存时区分 id
    counter: Arc<AtomicU64>,
}

impl JsonFileStore {
    pub fn new(folder: impl AsRef<Path>) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn next_id(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}-{:04}",
            chrono::Local::now().format("%Y%m%d%H%M%S%3f"),
            seq
        )
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.folder.join(format!("{}.json", id))
    }
}

impl AssignmentStore for JsonFileStore {
    async fn save(&self, payload: &AssignmentPayload) -> Result<StoredAssignment, StoreError> {
        let write_failed = |path: &Path, source: std::io::Error| StoreError::WriteFailed {
            path: path.display().to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.folder)
            .await
            .map_err(|e| write_failed(&self.folder, e))?;

        let id = self.next_id();
        let path = self.path_for(&id);
        let data = serde_json::to_vec_pretty(payload)
            .map_err(|source| StoreError::Serialization { source })?;

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| write_failed(&path, e))?;

        debug!("作业已写入: {}", path.display());
        Ok(StoredAssignment { id })
    }

    async fn load(&self, id: &str) -> Result<AssignmentPayload, StoreError> {
        let path = self.path_for(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id: id.to_string() })
            }
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialization { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionDraft, AssignmentMetadata, WordAddress};
    use crate::services::ContentBuilder;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_preserves_document() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("out"));

        let builder = ContentBuilder::new();
        let doc = builder.build("Hello there. General Kenobi!");
        let doc = builder
            .attach_action(&doc, &WordAddress::new(1, 1), ActionDraft::fill(["e", "o"]))
            .unwrap();
        let doc = builder
            .attach_action(&doc, &WordAddress::new(0, 0), ActionDraft::define("a greeting word"))
            .unwrap();
        let payload = AssignmentPayload::new("Greetings", doc, AssignmentMetadata::default());

        let loaded = tokio_test::block_on(async {
            let stored = store.save(&payload).await.unwrap();
            store.load(&stored.id).await.unwrap()
        });

        assert_eq!(loaded, payload);
    }

    #[test]
    fn test_ids_are_unique() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let payload = AssignmentPayload::new(
            "Empty",
            ContentBuilder::new().build("Hi."),
            AssignmentMetadata::default(),
        );

        let (a, b) = tokio_test::block_on(async {
            (store.save(&payload).await.unwrap(), store.save(&payload).await.unwrap())
        });
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_load_rejects_tampered_fill() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let builder = ContentBuilder::new();
        let doc = builder.build("The LETTER came.");
        let doc = builder
            .attach_action(&doc, &WordAddress::new(0, 1), ActionDraft::fill(["e", "t"]))
            .unwrap();
        let payload = AssignmentPayload::new("Mail", doc, AssignmentMetadata::default());

        let stored = tokio_test::block_on(store.save(&payload)).unwrap();
        let path = store.path_for(&stored.id);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"hiddenLetterCount\": 4"));
        std::fs::write(&path, text.replace("\"hiddenLetterCount\": 4", "\"hiddenLetterCount\": 1")).unwrap();

        let err = tokio_test::block_on(store.load(&stored.id)).unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
    }

    #[test]
    fn test_load_missing() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let err = tokio_test::block_on(store.load("nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
