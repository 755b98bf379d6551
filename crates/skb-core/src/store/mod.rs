//! Listing store port.
//!
//! Persistence lives behind this trait; the classifier and matcher never
//! touch it directly. Store failures surface as [`Error::Store`] and are
//! propagated unchanged; the core performs no retry.
//!
//! [`Error::Store`]: crate::Error::Store

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    domain::{ChatId, Listing, ListingId, NewListing},
    lexicon::Category,
    Result,
};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Aggregate counts over stored listings, for `/stats`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub total: u64,
    pub by_category: BTreeMap<Category, u64>,
}

/// Hexagonal port for listing persistence.
///
/// No ordering guarantee is promised by `listings_for`; the matcher imposes
/// its own ordering. Expiry filtering in the matcher is authoritative;
/// `delete_expired` is housekeeping only.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn insert(&self, listing: NewListing) -> Result<ListingId>;

    /// All listings for a category within one chat, expired or not.
    async fn listings_for(&self, category: Category, chat: ChatId) -> Result<Vec<Listing>>;

    /// Remove listings older than `expiry_days`; returns the removed count.
    async fn delete_expired(&self, expiry_days: u32) -> Result<u64>;

    async fn stats(&self) -> Result<StoreStats>;
}
