//! JSON 프로필 문서 저장소.
//!
//! 문서 하나(`user_id → UserProfile`)를 통째로 읽고 쓴다.
//! 모든 읽기/쓰기는 저장소 전역 비동기 뮤텍스 아래에서 수행되므로
//! 같은 프로세스 안의 동시 갱신이 서로를 덮어쓰지 않는다.
//!
//! 쓰기 순서: 같은 폴더의 임시 파일에 기록 → 문서 경로로 rename.
//! 파싱할 수 없는 문서는 `<name>.corrupt-<timestamp>`로 옮기고 빈 문서로 다시 시작한다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use replaycoach_core::error::CoreError;
use replaycoach_core::models::history::HistoryEntry;
use replaycoach_core::models::profile::{ProfileDocument, UserProfile};
use replaycoach_core::ports::profile_store::{ProfileMutation, ProfileStore};

/// JSON 파일 기반 프로필 저장소
pub struct JsonProfileStore {
    /// 문서 경로
    path: PathBuf,
    /// load → modify → store 사이클 직렬화
    lock: Mutex<()>,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// 문서 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn corrupt_backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%d%H%M%S%3f")));
        self.path.with_file_name(name)
    }

    // 아래 read/write는 호출자가 lock을 잡고 있어야 한다

    async fn read_document(&self) -> Result<ProfileDocument, CoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "프로필 문서 없음, 빈 문서 생성");
                let empty = ProfileDocument::new();
                self.write_document(&empty).await?;
                return Ok(empty);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<ProfileDocument>(&content) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                let backup = self.corrupt_backup_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    "프로필 문서 파싱 실패, 백업 후 초기화: {e}"
                );
                fs::rename(&self.path, &backup).await?;
                let empty = ProfileDocument::new();
                self.write_document(&empty).await?;
                Ok(empty)
            }
        }
    }

    async fn write_document(&self, doc: &ProfileDocument) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(doc)?;
        let temp = self.temp_path();
        fs::write(&temp, content.as_bytes()).await?;
        fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), users = doc.len(), "프로필 문서 저장");
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for JsonProfileStore {
    async fn load_all(&self) -> Result<ProfileDocument, CoreError> {
        let _guard = self.lock.lock().await;
        self.read_document().await
    }

    async fn save_all(&self, profiles: &ProfileDocument) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        self.write_document(profiles).await
    }

    async fn load_one(&self, user_id: &str) -> Result<UserProfile, CoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        if let Some(profile) = doc.get(user_id) {
            return Ok(profile.clone());
        }

        info!(user_id, "새 사용자 프로필 생성");
        let profile = UserProfile::new_default(user_id);
        doc.insert(user_id.to_string(), profile.clone());
        self.write_document(&doc).await?;
        Ok(profile)
    }

    async fn save_one(&self, user_id: &str, profile: &UserProfile) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.insert(user_id.to_string(), profile.clone());
        self.write_document(&doc).await
    }

    async fn append_history(&self, user_id: &str, entry: HistoryEntry) -> Result<(), CoreError> {
        let push = move |profile: &mut UserProfile| profile.history.push(entry);
        self.update(user_id, Box::new(push)).await.map(|_| ())
    }

    async fn update(
        &self,
        user_id: &str,
        mutation: ProfileMutation,
    ) -> Result<UserProfile, CoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        let profile = doc
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new_default(user_id));
        mutation(profile);
        let updated = profile.clone();
        self.write_document(&doc).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use replaycoach_core::models::history::ImageEntry;
    use replaycoach_core::models::stats::ExtractedStats;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn image_entry(path: &str, feedback: &str) -> HistoryEntry {
        HistoryEntry::Image(ImageEntry {
            image_path: path.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            ai_feedback: feedback.to_string(),
            stats: ExtractedStats::empty(),
        })
    }

    fn store_in(dir: &TempDir) -> JsonProfileStore {
        JsonProfileStore::new(dir.path().join("user_profiles.json"))
    }

    #[tokio::test]
    async fn missing_document_is_created_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let doc = store.load_all().await.unwrap();
        assert!(doc.is_empty());
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.trim(), "{}");
    }

    #[tokio::test]
    async fn load_one_creates_and_persists_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let profile = store.load_one("u1").await.unwrap();
        assert_eq!(profile.name, "Player");
        assert_eq!(profile.rank, "Unknown");
        assert!(profile.history.is_empty());

        let doc = store.load_all().await.unwrap();
        assert_eq!(doc.get("u1"), Some(&profile));
    }

    #[tokio::test]
    async fn appends_preserve_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for i in 0..5 {
            store
                .append_history("u1", image_entry(&format!("score{i}.png"), "ok"))
                .await
                .unwrap();
        }

        let profile = store.load_one("u1").await.unwrap();
        let paths: Vec<&str> = profile.history.iter().map(|e| e.source_path()).collect();
        assert_eq!(
            paths,
            vec!["score0.png", "score1.png", "score2.png", "score3.png", "score4.png"]
        );
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.append_history("u1", image_entry("a.png", "A")).await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.append_history("u1", image_entry("b.png", "B")).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let profile = store.load_one("u1").await.unwrap();
        let mut paths: Vec<&str> = profile.history.iter().map(|e| e.source_path()).collect();
        paths.sort();
        assert_eq!(paths, vec!["a.png", "b.png"]);
    }

    #[tokio::test]
    async fn concurrent_updates_for_different_users_survive() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let mut tasks = Vec::new();
        for user in ["u1", "u2", "u3"] {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.append_history(user, image_entry("x.png", user)).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let doc = store.load_all().await.unwrap();
        assert_eq!(doc.len(), 3);
        assert!(doc.values().all(|p| p.history.len() == 1));
    }

    #[tokio::test]
    async fn save_all_of_load_all_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.append_history("u1", image_entry("a.png", "A")).await.unwrap();

        let before = std::fs::read_to_string(store.path()).unwrap();
        let doc = store.load_all().await.unwrap();
        store.save_all(&doc).await.unwrap();
        let after = std::fs::read_to_string(store.path()).unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn update_applies_mutation_and_returns_profile() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let entry = image_entry("score1.png", "Hold high ground");
        let updated = store
            .update("u1", Box::new(move |p: &mut UserProfile| p.record(entry)))
            .await
            .unwrap();

        assert_eq!(updated.history.len(), 1);
        assert_eq!(
            updated.last_seen,
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(store.load_one("u1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn save_one_replaces_profile() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut profile = store.load_one("u1").await.unwrap();
        profile.rank = "Gold 3".to_string();
        store.save_one("u1", &profile).await.unwrap();

        assert_eq!(store.load_one("u1").await.unwrap().rank, "Gold 3");
    }

    #[tokio::test]
    async fn corrupt_document_is_backed_up_and_reset() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let doc = store.load_all().await.unwrap();
        assert!(doc.is_empty());

        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_string_lossy()
                    .starts_with("user_profiles.json.corrupt-")
            })
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            std::fs::read_to_string(backups[0].path()).unwrap(),
            "{ not json"
        );
    }

    #[tokio::test]
    async fn reads_legacy_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let legacy = r#"{
  "default_user": {
    "user_id": "default_user",
    "name": "Player",
    "rank": "Unknown",
    "preferred_roles": [],
    "best_heroes": [],
    "win_loss_stats": {"wins": 0, "losses": 0},
    "improvement_areas": [],
    "last_seen": "2025-01-02 03:04:05",
    "history": [
      {
        "image_path": "incoming/score1.png",
        "timestamp": "2025-01-02 03:04:05",
        "ai_feedback": "Use cover",
        "stats": {"Kills": "12", "Deaths": "3", "Assists": "N/A"}
      }
    ]
  }
}"#;
        std::fs::write(store.path(), legacy).unwrap();

        let profile = store.load_one("default_user").await.unwrap();
        assert_eq!(profile.history.len(), 1);
        assert_eq!(profile.history[0].ai_feedback(), "Use cover");
        assert!(profile.last_seen.is_some());
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.load_one("u1").await.unwrap();

        assert!(!dir.path().join("user_profiles.json.tmp").exists());
    }
}
