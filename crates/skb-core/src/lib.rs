//! Core domain + application logic for the society listings bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! adapter crate; persistence lives behind the [`store::ListingStore`] port.
//! The classifier and matcher are pure functions over their inputs plus the
//! read-only [`lexicon::Lexicon`].

pub mod classifier;
pub mod cleanup;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod lexicon;
pub mod logging;
pub mod matcher;
pub mod store;

pub use errors::{Error, Result};
