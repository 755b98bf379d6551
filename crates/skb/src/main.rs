use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use skb_core::{
    cleanup::spawn_cleanup,
    config::Config,
    store::{JsonFileStore, ListingStore},
};

#[tokio::main]
async fn main() -> Result<(), skb_core::Error> {
    skb_core::logging::init("skb");

    let cfg = Arc::new(Config::load()?);
    tracing::info!(store = %cfg.store_path.display(), expiry_days = cfg.expiry_days, "starting");

    let store: Arc<dyn ListingStore> = Arc::new(JsonFileStore::open(&cfg.store_path)?);

    let cancel = CancellationToken::new();
    let cleanup = spawn_cleanup(
        store.clone(),
        cfg.expiry_days,
        cfg.cleanup_interval,
        cancel.clone(),
    );

    let result = skb_telegram::router::run_polling(cfg, store.clone())
        .await
        .map_err(|e| skb_core::Error::External(format!("telegram bot failed: {e}")));

    cancel.cancel();
    let _ = cleanup.await;

    result
}
