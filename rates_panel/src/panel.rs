//! The rate refresh panel.
//!
//! `RatePanel::refresh` walks the configured symbols in order, loads the last
//! two daily closes of each, updates the per-symbol `RateEntry`, builds one
//! card per symbol and finally swaps the whole card list into the grid.
//!
//! A symbol whose history cannot be loaded never stops the walk: the failure
//! becomes `RateError::FetchUnavailable`, is logged, and the symbol shows the
//! placeholder with a neutral color.
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rates_common::{ClosePair, Interval, PanelConfig, RateError, Result, Ticker};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::loader::CandleSource;
use crate::model::card::{Grid, PriceCard};
use crate::model::rate::RateEntry;
use crate::page;

/// Candle interval the panel compares closes at.
pub const REFRESH_INTERVAL: Interval = Interval::Day1;

/// Outcome counters of one refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshSummary {
    /// Symbols processed.
    pub total: usize,
    /// Symbols with a fresh price.
    pub available: usize,
    /// Symbols showing the placeholder.
    pub unavailable: usize,
    /// Wall time of the refresh.
    pub elapsed: Duration,
}

/// Panel state: configuration, rate mapping and the displayed grid.
pub struct RatePanel<S: CandleSource> {
    source: S,
    config: PanelConfig,
    exchange_rates: HashMap<Ticker, RateEntry>,
    grid: Grid,
    refreshed_at: Option<DateTime<Utc>>,
}

impl<S: CandleSource> RatePanel<S> {
    /// Create an empty panel; nothing is loaded until the first refresh.
    pub fn new(source: S, config: PanelConfig) -> Self {
        Self {
            source,
            config,
            exchange_rates: HashMap::new(),
            grid: Grid::default(),
            refreshed_at: None,
        }
    }

    /// Reload every symbol and rebuild the grid.
    pub fn refresh(&mut self) -> RefreshSummary {
        let started = Instant::now();
        let mut cards = Vec::with_capacity(self.config.symbols.len());
        let mut unavailable = 0;

        for ticker in self.config.symbols.clone() {
            let entry = match self.latest_closes(ticker) {
                Ok(pair) => {
                    RateEntry::from_closes(&pair, self.config.display_width, self.config.price_format)
                }
                Err(e) => {
                    warn!("{}", e);
                    unavailable += 1;
                    RateEntry::unavailable()
                }
            };

            let card = PriceCard {
                ticker,
                price: entry.display_price(&self.config.placeholder).to_string(),
                color: entry.color,
            };
            debug!("Card {} price={} color={}", ticker, card.price, card.color);
            self.exchange_rates.insert(ticker, entry);
            cards.push(card);
        }

        self.grid.replace_children(cards);
        self.refreshed_at = Some(Utc::now());

        let total = self.config.symbols.len();
        let summary = RefreshSummary {
            total,
            available: total - unavailable,
            unavailable,
            elapsed: started.elapsed(),
        };
        info!(
            "Refreshed {} symbols from {}: {} available, {} unavailable in {:.2?}",
            summary.total,
            self.config.source,
            summary.available,
            summary.unavailable,
            summary.elapsed
        );
        summary
    }

    /// Load the two most recent daily closes for `ticker`.
    ///
    /// Any failure, whatever its cause, comes back as `FetchUnavailable`.
    pub fn latest_closes(&self, ticker: Ticker) -> Result<ClosePair> {
        let symbol = ticker.to_string();
        self.source
            .load(&symbol, REFRESH_INTERVAL, self.config.source)
            .and_then(|candles| ClosePair::from_candles(&candles))
            .map_err(|e| RateError::unavailable(symbol, e))
    }

    /// Rate entries in display order, skipping symbols never refreshed.
    pub fn entries(&self) -> impl Iterator<Item = (Ticker, &RateEntry)> + '_ {
        self.config
            .symbols
            .iter()
            .filter_map(|t| self.exchange_rates.get(t).map(|e| (*t, e)))
    }

    /// Cards currently on display.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Effective configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Full HTML document of the current grid.
    pub fn render_page(&self) -> String {
        page::render_page(&self.grid, self.refreshed_at)
    }
}
