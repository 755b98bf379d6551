use std::{
    collections::HashSet,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

/// Typed configuration, loaded once at startup from the environment (with an
/// optional `.env` file) and passed explicitly to the components that need
/// it.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// Chats the bot serves. Empty means all groups it is added to.
    pub allowed_chat_ids: HashSet<i64>,

    /// Listing store file.
    pub store_path: PathBuf,

    /// Listings older than this are invisible to matching.
    pub expiry_days: u32,

    /// Cap on listings shown per query reply.
    pub max_results: usize,

    /// How often expired listings are purged from the store.
    pub cleanup_interval: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let allowed_chat_ids = parse_csv_i64(env_str("ALLOWED_CHAT_IDS"))
            .into_iter()
            .collect();

        let store_path =
            PathBuf::from(env_str("STORE_PATH").unwrap_or("listings.json".to_string()));

        let expiry_days = env_u32("LISTING_EXPIRY_DAYS").unwrap_or(180);
        let max_results = env_usize("MAX_RESULTS").unwrap_or(5);
        let cleanup_interval =
            Duration::from_secs(env_u64("CLEANUP_INTERVAL_SECS").unwrap_or(86_400));

        Ok(Self {
            telegram_bot_token,
            allowed_chat_ids,
            store_path,
            expiry_days,
            max_results,
            cleanup_interval,
        })
    }

    /// Whether the bot should act on messages from `chat_id`.
    pub fn chat_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chat_ids.is_empty() || self.allowed_chat_ids.contains(&chat_id)
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u32(key: &str) -> Option<u32> {
    env_str(key).and_then(|s| s.trim().parse::<u32>().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn parse_csv_i64(v: Option<String>) -> Vec<i64> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(allowed: &[i64]) -> Config {
        Config {
            telegram_bot_token: "x".to_string(),
            allowed_chat_ids: allowed.iter().copied().collect(),
            store_path: "/tmp/skb-test.json".into(),
            expiry_days: 180,
            max_results: 5,
            cleanup_interval: Duration::from_secs(86_400),
        }
    }

    #[test]
    fn empty_allowlist_admits_every_chat() {
        let cfg = test_config(&[]);
        assert!(cfg.chat_allowed(-100123));
        assert!(cfg.chat_allowed(42));
    }

    #[test]
    fn non_empty_allowlist_is_exact() {
        let cfg = test_config(&[-100123]);
        assert!(cfg.chat_allowed(-100123));
        assert!(!cfg.chat_allowed(42));
    }

    #[test]
    fn csv_parsing_skips_blanks_and_junk() {
        let got = parse_csv_i64(Some(" -1, ,2,abc,3 ".to_string()));
        assert_eq!(got, vec![-1, 2, 3]);
    }
}
