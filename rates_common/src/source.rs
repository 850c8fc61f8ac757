//! Market-data sources and the candle intervals each of them can serve.
//!
//! Every source speaks its own interval dialect (`1d` for Yahoo Finance, `D`
//! for Bybit). `Interval` is the workspace-wide vocabulary; `DataSource`
//! translates it to the source's wire code and rejects the combinations the
//! source cannot serve before any request goes out.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::RateError;

/// Candle interval requested from a source.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, Hash, Eq, PartialEq,
)]
pub enum Interval {
    /// One minute.
    #[strum(serialize = "1min")]
    #[serde(rename = "1min")]
    Min1,
    /// Five minutes.
    #[strum(serialize = "5min")]
    #[serde(rename = "5min")]
    Min5,
    /// Fifteen minutes.
    #[strum(serialize = "15min")]
    #[serde(rename = "15min")]
    Min15,
    /// Thirty minutes.
    #[strum(serialize = "30min")]
    #[serde(rename = "30min")]
    Min30,
    /// Sixty minutes.
    #[strum(serialize = "60min")]
    #[serde(rename = "60min")]
    Min60,
    /// One hour; served with the same code as `60min`.
    #[strum(serialize = "1hour")]
    #[serde(rename = "1hour")]
    Hour1,
    /// One day. The panel always asks for this one.
    #[strum(serialize = "1day")]
    #[serde(rename = "1day")]
    Day1,
    /// One week.
    #[strum(serialize = "1week")]
    #[serde(rename = "1week")]
    Week1,
}

/// Where candles are loaded from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum DataSource {
    /// Yahoo Finance chart API, `{SYM}-USD` pairs.
    #[default]
    YahooFinance,
    /// Bybit v5 spot klines, `{SYM}USDT` pairs.
    Bybit,
    /// Offline random walk, no network access.
    Synthetic,
}

impl DataSource {
    /// Intervals this source can serve, paired with the source's wire code.
    fn interval_map(&self) -> &'static [(Interval, &'static str)] {
        match self {
            DataSource::YahooFinance => &[
                (Interval::Min1, "1m"),
                (Interval::Min5, "5m"),
                (Interval::Min15, "15m"),
                (Interval::Min30, "30m"),
                (Interval::Min60, "60m"),
                (Interval::Hour1, "60m"),
                (Interval::Day1, "1d"),
                (Interval::Week1, "1wk"),
            ],
            DataSource::Bybit => &[
                (Interval::Min1, "1"),
                (Interval::Min5, "5"),
                (Interval::Min15, "15"),
                (Interval::Min30, "30"),
                (Interval::Min60, "60"),
                (Interval::Hour1, "60"),
                (Interval::Day1, "D"),
                (Interval::Week1, "W"),
            ],
            DataSource::Synthetic => &[(Interval::Day1, "1d")],
        }
    }

    /// Intervals this source supports, in ascending length.
    pub fn supported_intervals(&self) -> Vec<Interval> {
        self.interval_map().iter().map(|(i, _)| *i).collect()
    }

    /// Returns `true` if `interval` can be requested from this source.
    pub fn supports(&self, interval: Interval) -> bool {
        self.interval_map().iter().any(|(i, _)| *i == interval)
    }

    /// Translate `interval` to this source's wire code.
    ///
    /// Fails with `UnsupportedInterval` listing what the source does accept.
    pub fn interval_code(&self, interval: Interval) -> Result<&'static str, RateError> {
        self.interval_map()
            .iter()
            .find(|(i, _)| *i == interval)
            .map(|(_, code)| *code)
            .ok_or_else(|| RateError::UnsupportedInterval {
                data_source: *self,
                interval,
                supported: self
                    .supported_intervals()
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// The pair name this source uses for a USD-quoted `symbol`.
    pub fn pair_symbol(&self, symbol: &str) -> String {
        match self {
            DataSource::YahooFinance => format!("{}-USD", symbol),
            DataSource::Bybit => format!("{}USDT", symbol),
            DataSource::Synthetic => symbol.to_string(),
        }
    }
}
