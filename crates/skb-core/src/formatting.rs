//! Reply formatting for Telegram HTML parse mode.

use crate::domain::{MatchResult, QueryIntent};
use crate::store::StoreStats;

const SNIPPET_MAX: usize = 80;

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Ranked match cards for a query reply.
///
/// Callers must not send this when the result is empty; "no match" stays
/// silent in the group.
pub fn format_match_reply(query: &QueryIntent, result: &MatchResult) -> String {
    let mut lines = vec![format!(
        "{} <b>{} match{} for \"{}\"</b>",
        query.category.emoji(),
        result.len(),
        if result.len() == 1 { "" } else { "es" },
        escape_html(&query.subject),
    )];

    for entry in &result.entries {
        let listing = &entry.listing;
        let name = escape_html(&listing.author.display_name());
        let contact = listing
            .contact
            .as_deref()
            .map(|c| format!(" \u{00B7} \u{1F4DE} {}", escape_html(c)))
            .unwrap_or_default();
        lines.push(format!(
            "{}. <b>{name}</b>{contact} ({})",
            entry.rank, entry.recency
        ));
        lines.push(format!("   <i>{}</i>", escape_html(&snippet(&listing.message))));
    }

    lines.join("\n")
}

/// `/stats` reply: total plus per-category counts.
pub fn format_stats(stats: &StoreStats) -> String {
    if stats.total == 0 {
        return "\u{1F4CA} No active listings yet.".to_string();
    }

    let mut lines = vec![format!("\u{1F4CA} <b>Active listings: {}</b>", stats.total)];
    for (category, count) in &stats.by_category {
        lines.push(format!(
            "{} {}: {count}",
            category.emoji(),
            escape_html(category.label())
        ));
    }
    lines.join("\n")
}

/// `/help` and `/start` reply.
pub fn help_text() -> String {
    "\u{1F3E0} <b>Society Listings Bot</b>\n\
     \n\
     I quietly match what people offer with what people ask for.\n\
     \n\
     <b>How it works</b>\n\
     1. Someone posts an offer (\"Selling 2BHK flat, contact 9876543210\") — I save it.\n\
     2. Someone asks (\"need plumber\", \"maid chahiye\") — I reply with recent matching contacts.\n\
     \n\
     <b>Commands</b>\n\
     /stats — active listing counts\n\
     /help — this message\n\
     \n\
     <b>Categories</b>\n\
     property, furniture, maid/cook, plumber, electrician, carpenter, driver, \
     AC repair, tutor, packers &amp; movers, vehicle, pest control, painter, security guard"
        .to_string()
}

fn snippet(message: &str) -> String {
    let flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_MAX {
        return flat;
    }
    let mut out: String = flat.chars().take(SNIPPET_MAX).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Author, ChatId, Listing, ListingId, MessageId, RankedListing, UserId};
    use crate::lexicon::Category;
    use chrono::Utc;

    fn ranked(rank: u32, username: Option<&str>, contact: Option<&str>) -> RankedListing {
        RankedListing {
            rank,
            recency: "yesterday".to_string(),
            listing: Listing {
                id: ListingId(rank as u64),
                author: Author {
                    user_id: UserId(1),
                    username: username.map(|s| s.to_string()),
                    first_name: Some("Ravi".to_string()),
                },
                chat_id: ChatId(7),
                message_id: MessageId(1),
                category: Category::Property,
                subject: "2bhk".to_string(),
                contact: contact.map(|s| s.to_string()),
                message: "2bhk flat for rent near <gate 3>".to_string(),
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn escape_html_covers_specials() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn match_reply_lists_ranks_names_and_recency() {
        let query = QueryIntent {
            category: Category::Property,
            subject: "2bhk".to_string(),
        };
        let result = MatchResult {
            entries: vec![
                ranked(1, Some("ravi_k"), Some("9876543210")),
                ranked(2, None, None),
            ],
        };

        let out = format_match_reply(&query, &result);
        assert!(out.contains("2 matches for \"2bhk\""));
        assert!(out.contains("1. <b>@ravi_k</b>"));
        assert!(out.contains("9876543210"));
        assert!(out.contains("2. <b>Ravi</b>"));
        assert!(out.contains("(yesterday)"));
        // Raw message content is escaped.
        assert!(out.contains("&lt;gate 3&gt;"));
    }

    #[test]
    fn single_match_header_is_singular() {
        let query = QueryIntent {
            category: Category::Property,
            subject: "2bhk".to_string(),
        };
        let result = MatchResult {
            entries: vec![ranked(1, None, None)],
        };
        // Entries without a stored contact still count as matches.
        assert!(format_match_reply(&query, &result).contains("1 match for \"2bhk\""));
    }

    #[test]
    fn stats_reply_handles_empty_store() {
        assert!(format_stats(&StoreStats::default()).contains("No active listings"));
    }

    #[test]
    fn long_messages_are_snipped() {
        let s = snippet(&"word ".repeat(60));
        assert!(s.ends_with("..."));
        assert!(s.chars().count() <= SNIPPET_MAX + 3);
    }
}
