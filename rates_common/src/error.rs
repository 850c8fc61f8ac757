//! Error types shared between the panel and its data loaders.
//!
//! The `RateError` enum unifies the failure cases for I/O, configuration,
//! HTTP transport, payload decoding and channel communication. Only one of
//! them is handled inside a refresh: `FetchUnavailable`, which every
//! per-symbol loading failure collapses into.
use std::io;

use crossbeam_channel::{RecvError, SendError};
use thiserror::Error;

use crate::source::{DataSource, Interval};

/// Unified error type shared by the panel and the loaders.
#[derive(Error, Debug)]
pub enum RateError {
    /// I/O error originating from the standard library (files, stdin).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error while parsing the ticker file into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// A symbol string that does not name a supported ticker.
    #[error("Unknown ticker symbol: {0}")]
    UnknownTicker(String),

    /// The source has no data at the requested interval.
    #[error("Interval {interval} not supported by {data_source}, supported: {supported}")]
    UnsupportedInterval {
        /// Source the request was addressed to.
        data_source: DataSource,
        /// Requested interval.
        interval: Interval,
        /// Comma-separated list of the intervals the source does support.
        supported: String,
    },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport or status failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., all senders closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// Price history for a symbol could not be obtained.
    #[error("Rate unavailable for {symbol}: {reason}")]
    FetchUnavailable {
        /// Symbol the refresh was loading.
        symbol: String,
        /// Underlying cause, flattened to text.
        reason: String,
    },
}

impl RateError {
    /// Collapse any error raised while loading `symbol` into `FetchUnavailable`.
    pub fn unavailable(symbol: impl Into<String>, cause: impl ToString) -> Self {
        RateError::FetchUnavailable {
            symbol: symbol.into(),
            reason: cause.to_string(),
        }
    }
}

impl<T> From<SendError<T>> for RateError {
    fn from(err: SendError<T>) -> Self {
        RateError::ChannelSend(err.to_string())
    }
}

impl From<RecvError> for RateError {
    fn from(err: RecvError) -> Self {
        RateError::ChannelRecv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_keeps_symbol_and_reason() {
        let err = RateError::unavailable("BTC", RateError::Format("only 1 close".into()));
        assert_eq!(
            err.to_string(),
            "Rate unavailable for BTC: Format error: only 1 close"
        );
    }

    #[test]
    fn unsupported_interval_lists_alternatives() {
        let err = RateError::UnsupportedInterval {
            data_source: DataSource::Synthetic,
            interval: Interval::Min30,
            supported: "1day".into(),
        };
        assert_eq!(
            err.to_string(),
            "Interval 30min not supported by Synthetic, supported: 1day"
        );
    }
}
