use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    domain::{ChatId, Listing, ListingId, NewListing},
    lexicon::Category,
    matcher::is_expired,
    store::{ListingStore, StoreStats},
    Error, Result,
};

/// JSON-file-backed listing store.
///
/// The whole dataset is held in memory behind a mutex and rewritten to disk
/// on every mutation. Fine for the group sizes this bot serves; a SQL
/// adapter would slot behind the same port unchanged.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<FileData>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct FileData {
    next_id: u64,
    listings: Vec<Listing>,
}

impl JsonFileStore {
    /// Open (or create) the store file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = load_file(&path)?.unwrap_or_default();
        Ok(Self {
            path,
            state: Mutex::new(data),
        })
    }

    fn persist(&self, data: &FileData) -> Result<()> {
        let txt = serde_json::to_string(data)?;
        std::fs::write(&self.path, txt)
            .map_err(|e| Error::Store(format!("write {}: {e}", self.path.display())))
    }
}

fn load_file(path: &Path) -> Result<Option<FileData>> {
    if !path.exists() {
        return Ok(None);
    }
    let txt = std::fs::read_to_string(path)
        .map_err(|e| Error::Store(format!("read {}: {e}", path.display())))?;
    if txt.trim().is_empty() {
        return Ok(None);
    }
    let data: FileData = serde_json::from_str(&txt)
        .map_err(|e| Error::Store(format!("parse {}: {e}", path.display())))?;
    Ok(Some(data))
}

#[async_trait]
impl ListingStore for JsonFileStore {
    async fn insert(&self, listing: NewListing) -> Result<ListingId> {
        let mut st = self.state.lock().await;
        st.next_id += 1;
        let id = ListingId(st.next_id);
        st.listings.push(listing.into_listing(id));
        self.persist(&st)?;
        Ok(id)
    }

    async fn listings_for(&self, category: Category, chat: ChatId) -> Result<Vec<Listing>> {
        let st = self.state.lock().await;
        Ok(st
            .listings
            .iter()
            .filter(|l| l.category == category && l.chat_id == chat)
            .cloned()
            .collect())
    }

    async fn delete_expired(&self, expiry_days: u32) -> Result<u64> {
        let now = Utc::now();
        let mut st = self.state.lock().await;
        let before = st.listings.len();
        st.listings
            .retain(|l| !is_expired(l.created_at, now, expiry_days));
        let removed = (before - st.listings.len()) as u64;
        if removed > 0 {
            self.persist(&st)?;
        }
        Ok(removed)
    }

    async fn stats(&self) -> Result<StoreStats> {
        let st = self.state.lock().await;
        let mut stats = StoreStats::default();
        for l in &st.listings {
            stats.total += 1;
            *stats.by_category.entry(l.category).or_insert(0) += 1;
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Author, MessageId, UserId};
    use chrono::Duration;

    fn tmp_path(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    fn new_listing(days_old: i64) -> NewListing {
        NewListing {
            author: Author {
                user_id: UserId(42),
                username: None,
                first_name: Some("Ravi".to_string()),
            },
            chat_id: ChatId(7),
            message_id: MessageId(3),
            category: Category::Property,
            subject: "2bhk".to_string(),
            contact: Some("9876543210".to_string()),
            message: "2bhk for rent".to_string(),
            created_at: Utc::now() - Duration::days(days_old),
        }
    }

    #[tokio::test]
    async fn survives_reopen() {
        let path = tmp_path("skb-store-reopen");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.insert(new_listing(1)).await.unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        let got = store.listings_for(Category::Property, ChatId(7)).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].subject, "2bhk");
        assert_eq!(got[0].contact.as_deref(), Some("9876543210"));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn ids_keep_increasing_across_reopen() {
        let path = tmp_path("skb-store-ids");
        let first = {
            let store = JsonFileStore::open(&path).unwrap();
            store.insert(new_listing(1)).await.unwrap()
        };
        let store = JsonFileStore::open(&path).unwrap();
        let second = store.insert(new_listing(1)).await.unwrap();
        assert!(second > first);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn delete_expired_reports_count_and_persists() {
        let path = tmp_path("skb-store-expiry");
        let store = JsonFileStore::open(&path).unwrap();
        store.insert(new_listing(200)).await.unwrap();
        store.insert(new_listing(5)).await.unwrap();

        assert_eq!(store.delete_expired(180).await.unwrap(), 1);

        let reopened = JsonFileStore::open(&path).unwrap();
        let got = reopened.listings_for(Category::Property, ChatId(7)).await.unwrap();
        assert_eq!(got.len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn empty_or_missing_file_opens_clean() {
        let path = tmp_path("skb-store-empty");
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.stats().await.unwrap().total, 0);

        std::fs::write(&path, "").unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.stats().await.unwrap().total, 0);

        let _ = std::fs::remove_file(&path);
    }
}
