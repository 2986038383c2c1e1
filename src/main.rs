//! ticker: polls a price feed and draws price + sparkline on a small panel.
//!
//! Run with:  `RUST_LOG=info ticker [path/to/ticker.toml]`

use anyhow::{Context, Result};
use std::path::PathBuf;
use ticker_config::{default_path, load as load_config};
use ticker_display::Panel;
use ticker_engine::Ticker;
use ticker_feed::Feed;
use ticker_renderer::Layout;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("ticker v{} starting", env!("CARGO_PKG_VERSION"));

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_path);

    let config = load_config(&path).context("loading configuration")?;
    config.validate().context("invalid configuration")?;

    let layout = Layout::from_config(&config);
    let source = Feed::from_config(&config.source).context("building price source")?;
    let panel = Panel::new(&config.display, &layout).context("initialising panel")?;

    let handle = Ticker::new(&config, source, panel)?.start();

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("listening for Ctrl-C")?;
            tracing::info!("Interrupted, shutting down");
        }
        _ = handle.stopped() => {}
    }

    let panel = handle.stop().await?;
    let stats = panel.stats();
    tracing::info!(
        full = stats.full,
        partial = stats.partial,
        skipped = stats.skipped,
        "Panel refreshes"
    );
    Ok(())
}
