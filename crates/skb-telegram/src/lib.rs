//! Telegram adapter (teloxide).
//!
//! Wires group-chat updates into the `skb-core` classifier, store and
//! matcher. The bot never initiates conversation: it only replies to
//! queries it can answer and to explicit commands.

pub mod handlers;
pub mod router;
