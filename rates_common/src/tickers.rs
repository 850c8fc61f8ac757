//! Cryptocurrency ticker symbols and helpers to read them from user input.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::RateError;

/// Quote currencies stripped from pair notation such as `BTCUSDT`.
const QUOTE_CURRENCIES: [&str; 3] = ["USDT", "USDC", "USD"];

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Tickers may be separated by commas, spaces, or new lines. Blank lines
    /// and anything after a `#` are ignored. Returns an error naming the line
    /// if any symbol cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, RateError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, RateError> {
        let mut tickers = Vec::new();

        for (number, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(RateError::Io)?;
            let content = line.split('#').next().unwrap_or_default();

            for token in content
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
            {
                match Self::parse_pair(token) {
                    Ok(ticker) => tickers.push(ticker),
                    Err(e) => {
                        return Err(RateError::ParseTickersFile(format!(
                            "line {}: {}",
                            number + 1,
                            e
                        )));
                    }
                }
            }
        }
        Ok(tickers)
    }
}

/// Set of supported cryptocurrency symbols.
///
/// Declaration order is the panel's default display order.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "upper")]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    BTC,
    ETH,
    USDT,
    BNB,
    USDC,
    XRP,
    ADA,
    SOL,
    DOGE,
    DOT,
    TRX,
    AVAX,
    SHIB,
    MATIC,
    LTC,
    DAI,
    WBTC,
    UNI,
    LINK,
    ATOM,
    LEO,
    ETC,
    XLM,
    BCH,
    ALGO,
    XMR,
    NEAR,
    FIL,
    VET,
    APE,
    ICP,
    HBAR,
    QNT,
    FLOW,
    EOS,
    EGLD,
    XTZ,
    SAND,
    MANA,
    AAVE,
    THETA,
    AXS,
    CHZ,
    ZEC,
    KCS,
    BSV,
    MKR,
    CRO,
}

impl Ticker {
    /// The fixed default symbol list, in display order.
    pub fn defaults() -> Vec<Ticker> {
        Ticker::iter().collect()
    }

    /// Parse a bare symbol or a USD-quoted pair.
    ///
    /// Accepts `btc`, `BTC-USD`, `BTC/USDT` and `BTCUSD`. Symbols that are
    /// themselves quote currencies (`USDT`, `USDC`) parse as-is.
    pub fn parse_pair(input: &str) -> Result<Ticker, RateError> {
        let upper = input.trim().to_ascii_uppercase();
        let base = upper
            .split(['-', '/'])
            .next()
            .unwrap_or_default()
            .to_string();

        if let Ok(ticker) = base.parse::<Ticker>() {
            return Ok(ticker);
        }
        QUOTE_CURRENCIES
            .iter()
            .filter_map(|quote| base.strip_suffix(quote))
            .find_map(|stripped| stripped.parse::<Ticker>().ok())
            .ok_or_else(|| RateError::UnknownTicker(input.trim().to_string()))
    }
}

impl TryFrom<String> for Ticker {
    type Error = RateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticker::parse_pair(&value)
    }
}
