//! Panel configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional JSON file, and command-line flags applied by the binary. Each
//! field has one visible effect:
//!
//! - `symbols` — which tickers get a card, and in which order.
//! - `placeholder` — price text shown when a symbol's rate is unavailable.
//! - `display_width` — how many characters of the price text are shown.
//! - `price_format` — whether that width is reached by cutting or rounding.
//! - `source` — where daily candles are loaded from.
//! - `request_timeout_secs` — per-request HTTP timeout.
//! - `output` — where the rendered page is written.
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

use crate::error::RateError;
use crate::source::DataSource;
use crate::tickers::Ticker;

/// Price text shown when a symbol could not be loaded.
pub const DEFAULT_PLACEHOLDER: &str = "N/A";
/// Number of characters kept from the price text.
pub const DEFAULT_DISPLAY_WIDTH: usize = 7;
/// Per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Default destination of the rendered page.
pub const DEFAULT_OUTPUT: &str = "rates.html";

/// How a price is fitted into `display_width` characters.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, Display, EnumString, Eq, PartialEq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriceFormat {
    /// Keep the first `display_width` characters of the decimal text.
    /// Cuts digits instead of rounding them.
    #[default]
    Truncate,
    /// Round to as many decimals as fit; integer digits are never cut.
    Round,
}

/// Effective configuration of a rate panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Tickers to display, in display order.
    pub symbols: Vec<Ticker>,
    /// Text shown instead of a price when loading failed.
    pub placeholder: String,
    /// Maximum length of the displayed price text.
    pub display_width: usize,
    /// Truncate or round to `display_width`.
    pub price_format: PriceFormat,
    /// Market-data source.
    pub source: DataSource,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Rendered page destination.
    pub output: PathBuf,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            symbols: Ticker::defaults(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            display_width: DEFAULT_DISPLAY_WIDTH,
            price_format: PriceFormat::default(),
            source: DataSource::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl PanelConfig {
    /// Read a JSON config; missing fields keep their defaults.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateError> {
        let config: PanelConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, RateError> {
        let file = File::open(path).map_err(|e| {
            RateError::Config(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reject values that would make the panel render nothing useful.
    pub fn validate(&self) -> Result<(), RateError> {
        if self.symbols.is_empty() {
            return Err(RateError::Config("symbol list is empty".into()));
        }
        if self.display_width == 0 {
            return Err(RateError::Config("display_width must be positive".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(RateError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = PanelConfig::default();
        assert_eq!(config.symbols.len(), 48);
        assert_eq!(config.placeholder, "N/A");
        assert_eq!(config.display_width, 7);
        assert_eq!(config.price_format, PriceFormat::Truncate);
        assert_eq!(config.source, DataSource::YahooFinance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let json = r#"{ "symbols": ["ETH", "BTC"], "placeholder": "--", "price_format": "round" }"#;
        let config = PanelConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.symbols, vec![Ticker::ETH, Ticker::BTC]);
        assert_eq!(config.placeholder, "--");
        assert_eq!(config.price_format, PriceFormat::Round);
        assert_eq!(config.display_width, DEFAULT_DISPLAY_WIDTH);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn symbols_accept_lowercase_and_pair_notation() {
        let json = r#"{ "symbols": ["btc", "eth-usd", "SOLUSDT"] }"#;
        let config = PanelConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.symbols, vec![Ticker::BTC, Ticker::ETH, Ticker::SOL]);

        let unknown = PanelConfig::from_reader(r#"{ "symbols": ["dogecoin2"] }"#.as_bytes());
        match unknown {
            Err(RateError::SerdeJson(e)) => assert!(e.to_string().contains("dogecoin2")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_width_and_empty_symbols() {
        let zero = PanelConfig::from_reader(r#"{ "display_width": 0 }"#.as_bytes());
        assert!(matches!(zero, Err(RateError::Config(_))));

        let empty = PanelConfig::from_reader(r#"{ "symbols": [] }"#.as_bytes());
        assert!(matches!(empty, Err(RateError::Config(_))));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = PanelConfig::from_reader(r#"{ "colour": "red" }"#.as_bytes());
        assert!(matches!(result, Err(RateError::SerdeJson(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "source": "synthetic", "display_width": 9 }}"#).unwrap();
        let config = PanelConfig::load(file.path()).unwrap();
        assert_eq!(config.source, DataSource::Synthetic);
        assert_eq!(config.display_width, 9);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = PanelConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(RateError::Config(_))));
    }
}
