//! Score store implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::collab::{ScoreStore, StoreError, UserId};

/// Volatile store, used for guest-friendly local play and tests.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: RwLock<HashMap<String, u32>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, user: &str, value: u32) -> Self {
        self.scores.get_mut().insert(user.to_owned(), value);
        self
    }
}

impl ScoreStore for MemoryScoreStore {
    async fn high_score(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        Ok(self.scores.read().await.get(user.as_str()).copied())
    }

    async fn set_high_score(&self, user: &UserId, value: u32) -> Result<(), StoreError> {
        self.scores.write().await.insert(user.0.clone(), value);
        Ok(())
    }

    async fn initialize(&self, user: &UserId, value: u32) -> Result<(), StoreError> {
        self.scores.write().await.entry(user.0.clone()).or_insert(value);
        Ok(())
    }
}

/// One user's persisted record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub highest_score: u32,
}

/// JSON document on disk: `{ "<user>": { "highestScore": n } }`.
///
/// A missing file reads as an empty store. Each write rewrites the document.
#[derive(Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<String, UserRecord>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(HashMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, records: &HashMap<String, UserRecord>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn update(
        &self,
        user: &UserId,
        f: impl FnOnce(&mut HashMap<String, UserRecord>),
    ) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        let mut records = self.read_all().await?;
        f(&mut records);
        self.write_all(&records).await?;
        tracing::debug!(user = user.as_str(), path = %self.path.display(), "score store updated");
        Ok(())
    }
}

impl ScoreStore for JsonFileScoreStore {
    async fn high_score(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        let _guard = self.lock.read().await;
        let records = self.read_all().await?;
        Ok(records.get(user.as_str()).map(|r| r.highest_score))
    }

    async fn set_high_score(&self, user: &UserId, value: u32) -> Result<(), StoreError> {
        self.update(user, |records| {
            records.entry(user.0.clone()).or_default().highest_score = value;
        })
        .await
    }

    async fn initialize(&self, user: &UserId, value: u32) -> Result<(), StoreError> {
        self.update(user, |records| {
            records.entry(user.0.clone()).or_insert(UserRecord {
                highest_score: value,
            });
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryScoreStore::new();
        let user = UserId::from("pilot");
        block_on(async {
            assert_eq!(store.high_score(&user).await.unwrap(), None);
            store.initialize(&user, 3).await.unwrap();
            store.initialize(&user, 99).await.unwrap();
            assert_eq!(store.high_score(&user).await.unwrap(), Some(3));
            store.set_high_score(&user, 8).await.unwrap();
            assert_eq!(store.high_score(&user).await.unwrap(), Some(8));
        });
    }

    #[test]
    fn memory_store_seeded_score() {
        let store = MemoryScoreStore::new().with_score("ace", 10);
        let got = block_on(store.high_score(&UserId::from("ace"))).unwrap();
        assert_eq!(got, Some(10));
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileScoreStore::new(dir.path().join("scores.json"));
        let got = block_on(store.high_score(&UserId::from("nobody"))).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn json_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let user = UserId::from("pilot");

        block_on(async {
            let store = JsonFileScoreStore::new(&path);
            store.initialize(&user, 4).await.unwrap();
            store.set_high_score(&user, 12).await.unwrap();
        });

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("highestScore"));

        let reopened = JsonFileScoreStore::new(&path);
        assert_eq!(block_on(reopened.high_score(&user)).unwrap(), Some(12));
    }

    #[test]
    fn json_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileScoreStore::new(&path);
        let err = block_on(store.high_score(&UserId::from("x"))).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
