//! Headless order board
//!
//! Connects to the backend, activates the orders tab and logs the board after
//! every refresh until Ctrl+C.
//!
//! ```text
//! tavola [config.yaml]
//! RUST_LOG=tavola=debug tavola
//! ```

use anyhow::{Context, Result};
use tavola::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tavola=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TavolaConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => TavolaConfig::default(),
    }
    .with_env_overrides()?;
    config.validate()?;

    let client = HttpApiClient::new(&config.api)?;
    client
        .health()
        .await
        .with_context(|| format!("backend at {} is not reachable", client.base_url()))?;
    tracing::info!(base_url = client.base_url(), "backend is up");

    let api: Arc<dyn DashboardApi> = Arc::new(client);
    let mut dashboard = Dashboard::new(api, &config);
    dashboard.start().await;

    let mut changes = dashboard.orders().store().changes();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Received Ctrl+C signal, shutting down...");
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                log_board(dashboard.orders());
            }
        }
    }

    dashboard.shutdown().await;
    Ok(())
}

fn log_board(view: &OrdersView) {
    if let Some(error) = view.error() {
        tracing::warn!("{}", error);
        return;
    }
    if view.store().is_loading() {
        return;
    }
    let counts = view
        .store()
        .status_counts()
        .into_iter()
        .map(|(status, n)| format!("{} {}", status.label(), n))
        .collect::<Vec<_>>()
        .join(" | ");
    tracing::info!("{}", counts);
    for order in view.orders() {
        tracing::info!(
            "#{:<4} {:<10} {:>3} items {:>8.2}",
            order.order_number,
            order.status.label(),
            order.item_count(),
            order.total_price
        );
    }
}
