use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use skb_core::{config::Config, lexicon::Lexicon, store::ListingStore};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub lexicon: Arc<Lexicon>,
    pub store: Arc<dyn ListingStore>,
}

pub async fn run_polling(cfg: Arc<Config>, store: Arc<dyn ListingStore>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!(bot = %me.username(), "listings bot started");
    }
    if cfg.allowed_chat_ids.is_empty() {
        tracing::info!("serving every group the bot is a member of");
    } else {
        tracing::info!(chats = cfg.allowed_chat_ids.len(), "serving allowlisted groups");
    }

    let state = Arc::new(AppState {
        cfg,
        lexicon: Arc::new(Lexicon::new()),
        store,
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
