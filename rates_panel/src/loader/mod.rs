//! Market-data loaders.
//!
//! The panel only needs one capability: "give me the candles of this symbol at
//! this interval from that source". `CandleSource` is that contract;
//! `MarketDataLoader` fulfils it by dispatching to one client per source.
//!
//! - `yahoo` — Yahoo Finance chart API.
//! - `bybit` — Bybit v5 spot klines.
//! - `synthetic` — offline random-walk candles.
use log::debug;
use rates_common::{Candle, DataSource, Interval, Result};
use std::time::Duration;

pub mod bybit;
pub mod synthetic;
pub mod yahoo;

use bybit::BybitClient;
use synthetic::SyntheticSource;
use yahoo::YahooClient;

/// Anything that can load a chronological candle series for a symbol.
pub trait CandleSource {
    /// Load candles for `symbol` at `interval` from `source`, oldest first.
    ///
    /// One call performs at most one network round trip.
    fn load(&self, symbol: &str, interval: Interval, source: DataSource) -> Result<Vec<Candle>>;
}

/// Loader that routes each request to the client of the requested source.
pub struct MarketDataLoader {
    yahoo: YahooClient,
    bybit: BybitClient,
    synthetic: SyntheticSource,
}

impl MarketDataLoader {
    /// Build HTTP clients sharing the given request `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            yahoo: YahooClient::new(timeout)?,
            bybit: BybitClient::new(timeout)?,
            synthetic: SyntheticSource::default(),
        })
    }
}

impl CandleSource for MarketDataLoader {
    fn load(&self, symbol: &str, interval: Interval, source: DataSource) -> Result<Vec<Candle>> {
        let code = source.interval_code(interval)?;
        let pair = source.pair_symbol(symbol);
        debug!("Loading {} ({}) at {} from {}", symbol, pair, interval, source);

        match source {
            DataSource::YahooFinance => self.yahoo.fetch_candles(&pair, code),
            DataSource::Bybit => self.bybit.fetch_candles(&pair, code),
            DataSource::Synthetic => self.synthetic.generate(&pair),
        }
    }
}
