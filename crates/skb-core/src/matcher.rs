//! Query matcher: ranks stored listings against a classified query.
//!
//! Pure over its inputs; the store supplies candidates and the caller
//! supplies `now`, so results are deterministic and testable.

use chrono::{DateTime, Utc};

use crate::domain::{ChatId, Listing, MatchResult, QueryIntent, RankedListing};

/// Rank candidate listings for a query.
///
/// Filters, in order: same chat as the query's origin (defensive re-filter
/// even when the store pre-filtered), not expired, exact category. Survivors
/// are sorted most-recent-first (stable: equal timestamps keep candidate
/// order), capped at `limit`, and given 1-based ranks with recency labels.
///
/// An empty result is a normal outcome, not an error.
pub fn match_listings(
    query: &QueryIntent,
    origin: ChatId,
    candidates: &[Listing],
    now: DateTime<Utc>,
    expiry_days: u32,
    limit: usize,
) -> MatchResult {
    let mut survivors: Vec<&Listing> = candidates
        .iter()
        .filter(|l| l.chat_id == origin)
        .filter(|l| !is_expired(l.created_at, now, expiry_days))
        .filter(|l| l.category == query.category)
        .collect();

    survivors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    survivors.truncate(limit);

    let entries = survivors
        .into_iter()
        .enumerate()
        .map(|(i, listing)| RankedListing {
            rank: (i + 1) as u32,
            recency: recency_label(listing.created_at, now),
            listing: listing.clone(),
        })
        .collect();

    MatchResult { entries }
}

/// A listing is invisible to matching once strictly older than the expiry
/// window, regardless of the store's deletion policy.
pub fn is_expired(created_at: DateTime<Utc>, now: DateTime<Utc>, expiry_days: u32) -> bool {
    now.signed_duration_since(created_at) > chrono::Duration::days(i64::from(expiry_days))
}

/// Human-readable age: "today", "yesterday", "N days ago".
pub fn recency_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(created_at).num_days();
    match days {
        d if d <= 0 => "today".to_string(),
        1 => "yesterday".to_string(),
        d => format!("{d} days ago"),
    }
}
