use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lexicon::Category;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric). Matching never crosses chats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i32);

/// Store-assigned listing id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingId(pub u64);

/// Display handle of the user who posted a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub user_id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl Author {
    /// `@username` when available, first name otherwise.
    pub fn display_name(&self) -> String {
        if let Some(u) = &self.username {
            return format!("@{u}");
        }
        self.first_name
            .clone()
            .unwrap_or_else(|| "Someone".to_string())
    }
}

/// A stored offer. Never mutated after creation; invisible to matching once
/// older than the configured expiry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub author: Author,
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub category: Category,
    pub subject: String,
    pub contact: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A listing as handed to the store for insertion (id assigned by the store).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub author: Author,
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub category: Category,
    pub subject: String,
    pub contact: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl NewListing {
    pub fn into_listing(self, id: ListingId) -> Listing {
        Listing {
            id,
            author: self.author,
            chat_id: self.chat_id,
            message_id: self.message_id,
            category: self.category,
            subject: self.subject,
            contact: self.contact,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

/// Classifier verdict for a single incoming message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Neither offering nor seeking anything recognizable.
    Ignore,
    Listing(ListingIntent),
    Query(QueryIntent),
}

/// Someone is offering something.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingIntent {
    pub category: Category,
    pub subject: String,
    pub contact: Option<String>,
}

/// Someone is seeking something. Transient: consumed by the matcher, never
/// persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryIntent {
    pub category: Category,
    pub subject: String,
}

/// One matched listing with its display rank (1-based) and recency label.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedListing {
    pub rank: u32,
    pub recency: String,
    pub listing: Listing,
}

/// Ordered match output. Empty is a normal outcome, not a failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchResult {
    pub entries: Vec<RankedListing>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
