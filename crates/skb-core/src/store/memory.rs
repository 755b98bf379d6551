use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatId, Listing, ListingId, NewListing},
    lexicon::Category,
    matcher::is_expired,
    store::{ListingStore, StoreStats},
    Result,
};

/// In-memory listing store: tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    listings: Vec<Listing>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn insert(&self, listing: NewListing) -> Result<ListingId> {
        let mut st = self.state.lock().await;
        st.next_id += 1;
        let id = ListingId(st.next_id);
        st.listings.push(listing.into_listing(id));
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
        Ok((before - st.listings.len()) as u64)
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
