use std::sync::Arc;

use chrono::Utc;
use teloxide::{prelude::*, types::ParseMode};

use skb_core::{
    classifier::classify,
    domain::{Author, ChatId, Classification, MessageId, NewListing, UserId},
    formatting::format_match_reply,
    matcher::match_listings,
};

use crate::router::AppState;

pub async fn handle_text(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let body = msg.text().unwrap_or("");
    let chat_id = ChatId(msg.chat.id.0);

    match classify(&state.lexicon, body) {
        Classification::Ignore => Ok(()),

        Classification::Listing(intent) => {
            let Some(user) = msg.from() else {
                // Channel reposts carry no author to hand out later.
                return Ok(());
            };

            let listing = NewListing {
                author: Author {
                    user_id: UserId(user.id.0 as i64),
                    username: user.username.clone(),
                    first_name: Some(user.first_name.clone()),
                },
                chat_id,
                message_id: MessageId(msg.id.0),
                category: intent.category,
                subject: intent.subject.clone(),
                contact: intent.contact,
                message: body.to_string(),
                created_at: Utc::now(),
            };

            // Stored silently; the group never sees an ack.
            match state.store.insert(listing).await {
                Ok(id) => tracing::info!(
                    id = id.0,
                    category = ?intent.category,
                    subject = %intent.subject,
                    "listing stored"
                ),
                Err(e) => tracing::warn!(error = %e, "failed to store listing"),
            }
            Ok(())
        }

        Classification::Query(query) => {
            let candidates = match state.store.listings_for(query.category, chat_id).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load listings for query");
                    return Ok(());
                }
            };

            let result = match_listings(
                &query,
                chat_id,
                &candidates,
                Utc::now(),
                state.cfg.expiry_days,
                state.cfg.max_results,
            );

            // No match means no reply; the group stays quiet.
            if result.is_empty() {
                tracing::debug!(category = ?query.category, "query had no matches");
                return Ok(());
            }

            tracing::info!(
                category = ?query.category,
                matches = result.len(),
                "replying to query"
            );
            bot.send_message(msg.chat.id, format_match_reply(&query, &result))
                .parse_mode(ParseMode::Html)
                .reply_to_message_id(msg.id)
                .await?;
            Ok(())
        }
    }
}
