//! Offline candle generator.
//!
//! Produces a short daily random walk around a rough reference price per
//! symbol, so the panel can be run and demonstrated without network access.
//! Every call draws a fresh walk.
use chrono::{Duration, DurationRound, Utc};
use rand::Rng;
use rates_common::{Candle, RateError, Result, Ticker};

/// Days of history produced per call.
const DEFAULT_DAYS: usize = 5;

/// Random-walk candle source.
pub struct SyntheticSource {
    days: usize,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self { days: DEFAULT_DAYS }
    }
}

impl SyntheticSource {
    /// Calculate the next synthetic close using a small random walk around `current_price`.
    ///
    /// The change is sampled uniformly from `[-3%, +3%]` and the result is
    /// clamped to a small positive floor.
    pub fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.03..0.03);
        let new_price = current_price * (1.0 + change);
        new_price.max(0.000_001)
    }

    /// Generate `days` daily candles for `symbol`, ending at today's midnight UTC.
    pub fn generate(&self, symbol: &str) -> Result<Vec<Candle>> {
        let ticker = Ticker::parse_pair(symbol)?;
        let today = Utc::now()
            .duration_trunc(Duration::days(1))
            .map_err(|e| RateError::Format(e.to_string()))?;

        let mut close = reference_price(ticker);
        let mut candles = Vec::with_capacity(self.days);
        for back in (0..self.days).rev() {
            let open = close;
            close = Self::next_price(open);
            candles.push(Candle {
                timestamp: today - Duration::days(back as i64),
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume: 0.0,
            });
        }
        Ok(candles)
    }
}

/// Order-of-magnitude USD price used to seed the walk.
fn reference_price(ticker: Ticker) -> f64 {
    match ticker {
        Ticker::BTC | Ticker::WBTC => 60_000.0,
        Ticker::ETH => 3_000.0,
        Ticker::BNB | Ticker::BCH | Ticker::MKR => 400.0,
        Ticker::SOL | Ticker::LTC | Ticker::XMR | Ticker::AAVE | Ticker::QNT => 100.0,
        Ticker::USDT | Ticker::USDC | Ticker::DAI => 1.0,
        Ticker::SHIB => 0.000_02,
        _ => 5.0,
    }
}
