//! Rate Panel — renders a grid of cryptocurrency price cards and refreshes it
//! on demand.
//!
//! On every activation the panel loads the two most recent daily closes of
//! each configured ticker, colors each card by the direction of the last
//! move, and rewrites an HTML page with the whole grid. Tickers whose data
//! cannot be loaded show a placeholder instead of a price.
//!
//! Usage example (CLI):
//! ```bash
//! rates_panel --source yahoo-finance --output ./rates.html
//! rates_panel --symbols btc,eth,sol --source synthetic --once
//! ```
//!
//! Interactive session: press Enter (or type `r`) to refresh, `q` to quit.
//!
//! Wiring:
//! - `args` — CLI flags layered over the optional JSON config file.
//! - `loader` — `CandleSource` contract and the per-source clients.
//! - `panel` — `RatePanel`, owner of the rate mapping and the grid.
//! - `model` — rate entries, trend colors and price cards.
//! - `page` — HTML document rendering and atomic publishing.
//! - `trigger` — stdin and Ctrl+C producers of `PanelEvent`s.
#![warn(missing_docs)]
mod args;
mod loader;
mod model;
mod page;
mod panel;
mod trigger;

use crate::args::Args;
use crate::loader::{CandleSource, MarketDataLoader};
use crate::panel::RatePanel;
use crate::trigger::PanelEvent;
use clap::Parser;
use crossbeam_channel::unbounded;
use log::{error, info, warn};
use rates_common::{RateError, Result};
use std::time::Duration;

fn main() -> Result<(), RateError> {
    init_logger();
    let args = Args::parse();
    let once = args.once;
    let config = args.into_config()?;
    info!(
        "Panel configured: {} symbols, source {}, output {}",
        config.symbols.len(),
        config.source,
        config.output.display()
    );

    let loader = MarketDataLoader::new(Duration::from_secs(config.request_timeout_secs))?;
    let mut panel = RatePanel::new(loader, config);

    if once {
        refresh_and_publish(&mut panel)?;
        return Ok(());
    }

    let (event_tx, event_rx) = unbounded::<PanelEvent>();
    trigger::install_ctrlc(event_tx.clone())?;
    trigger::spawn_stdin_trigger(event_tx);

    info!("Panel is running. Press Enter to refresh, q to quit.");
    loop {
        match event_rx.recv()? {
            PanelEvent::Activate => {
                if let Err(e) = refresh_and_publish(&mut panel) {
                    error!("Failed to publish grid: {}", e);
                }
            }
            PanelEvent::Quit => break,
        }
    }
    info!("Panel stopped.");
    Ok(())
}

/// Refresh the panel and write the page. Unavailable symbols are part of the
/// grid; only a failed page write is an error.
fn refresh_and_publish<S: CandleSource>(panel: &mut RatePanel<S>) -> Result<()> {
    let summary = panel.refresh();
    if summary.total > 0 && summary.unavailable == summary.total {
        warn!("No rate could be loaded from {}", panel.config().source);
    }
    let placeholder = panel.config().placeholder.clone();
    for (ticker, entry) in panel.entries() {
        info!(
            "RATE: {:<6} {:>12} {}",
            ticker,
            entry.display_price(&placeholder),
            entry.color
        );
    }

    let output = panel.config().output.clone();
    page::write_page(&output, &panel.render_page())?;
    info!(
        "Grid of {} cards published to {}",
        panel.grid().children().len(),
        output.display()
    );
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rates_common::{DataSource, PanelConfig, Ticker};
    use std::fs;

    fn synthetic_panel(output: std::path::PathBuf) -> RatePanel<MarketDataLoader> {
        let config = PanelConfig {
            symbols: vec![Ticker::BTC, Ticker::ETH],
            source: DataSource::Synthetic,
            output,
            ..PanelConfig::default()
        };
        let loader = MarketDataLoader::new(Duration::from_secs(1)).unwrap();
        RatePanel::new(loader, config)
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = synthetic_panel(dir.path().join("missing").join("rates.html"));
        assert!(refresh_and_publish(&mut panel).is_err());
    }

    #[test]
    fn publish_writes_the_whole_grid() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("rates.html");
        let mut panel = synthetic_panel(output.clone());

        refresh_and_publish(&mut panel).unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert_eq!(html.matches("class=\"price-card").count(), 2);
    }
}
