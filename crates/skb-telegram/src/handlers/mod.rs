//! Telegram update handlers.
//!
//! Every incoming message goes through one gate: commands are answered
//! directly, free text goes to the classifier, and everything else is
//! dropped without a reply.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(body) = msg.text() else {
        // Photos, stickers, joins: nothing to classify.
        return Ok(());
    };

    if body.starts_with('/') {
        return commands::handle_command(bot, msg, state).await;
    }

    // Free text is only classified inside group chats the bot serves.
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return Ok(());
    }
    if !state.cfg.chat_allowed(msg.chat.id.0) {
        return Ok(());
    }

    text::handle_text(bot, msg, state).await
}
