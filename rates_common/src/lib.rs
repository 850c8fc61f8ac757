//!
//! Common types and utilities shared by the rate panel and its data loaders.
//!
//! This crate aggregates:
//! - `error` — unified error type `RateError` used across the workspace.
//! - `result` — handy `Result<T, RateError>` alias.
//! - `tickers` — cryptocurrency ticker symbols and parsing helpers.
//! - `candle` — daily OHLC records returned by market-data sources.
//! - `source` — market-data sources and the intervals each one supports.
//! - `config` — panel configuration (symbol list, placeholder, display width).
#![warn(missing_docs)]
pub mod candle;
pub mod config;
pub mod error;
pub mod result;
pub mod source;
pub mod tickers;

pub use candle::{Candle, ClosePair};
pub use config::{PanelConfig, PriceFormat};
pub use error::RateError;
pub use result::Result;
pub use source::{DataSource, Interval};
pub use tickers::Ticker;
