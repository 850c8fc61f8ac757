//! OHLC records returned by market-data sources.
//!
//! Loaders hand back candles in chronological order. The panel only looks at
//! the closes of the last two, packed into a `ClosePair`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RateError;

/// One interval of trading for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Start of the interval, UTC.
    pub timestamp: DateTime<Utc>,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume; zero when the source does not report it.
    pub volume: f64,
}

impl Candle {
    /// Candle where every price equals `close`.
    pub fn flat(timestamp: DateTime<Utc>, close: f64) -> Self {
        Candle {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }
}

/// The two most recent closes of a chronological candle series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePair {
    /// Second to last close.
    pub prior: f64,
    /// Last close.
    pub latest: f64,
}

impl ClosePair {
    /// Take the last two closes from `candles`.
    ///
    /// Fails when fewer than two observations are present or a close is not
    /// a finite number.
    pub fn from_candles(candles: &[Candle]) -> Result<Self, RateError> {
        match candles {
            [.., prior, latest] => {
                if !prior.close.is_finite() || !latest.close.is_finite() {
                    return Err(RateError::Format(format!(
                        "non-finite close in ({}, {})",
                        prior.close, latest.close
                    )));
                }
                Ok(ClosePair {
                    prior: prior.close,
                    latest: latest.close,
                })
            }
            _ => Err(RateError::Format(format!(
                "need at least 2 closes, got {}",
                candles.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn series(closes: &[f64]) -> Vec<Candle> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Candle::flat(start + Duration::days(i as i64), *c))
            .collect()
    }

    #[test]
    fn takes_last_two_closes() {
        let pair = ClosePair::from_candles(&series(&[1.0, 10.0, 12.0])).unwrap();
        assert_eq!(
            pair,
            ClosePair {
                prior: 10.0,
                latest: 12.0
            }
        );
    }

    #[test]
    fn single_close_is_insufficient() {
        assert!(ClosePair::from_candles(&series(&[10.0])).is_err());
        assert!(ClosePair::from_candles(&[]).is_err());
    }

    #[test]
    fn nan_close_is_rejected() {
        assert!(ClosePair::from_candles(&series(&[10.0, f64::NAN])).is_err());
    }
}
