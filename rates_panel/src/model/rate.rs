//! Per-symbol rate state.
//!
//! A `RateEntry` is what the panel remembers about a symbol between refreshes:
//! the price text to display (or nothing, meaning "show the placeholder") and
//! the trend color derived from the last two daily closes.
use rates_common::{ClosePair, PriceFormat};
use strum::Display;

/// Trend of the latest close relative to the prior one.
#[derive(Debug, Clone, Copy, Default, Display, Hash, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum PriceColor {
    /// Latest close above the prior close.
    Up,
    /// Latest close below the prior close.
    Down,
    /// Equal closes, or no data.
    #[default]
    Neutral,
}

impl PriceColor {
    /// Compare `latest` against `prior`.
    pub fn from_closes(pair: &ClosePair) -> Self {
        if pair.latest > pair.prior {
            PriceColor::Up
        } else if pair.latest < pair.prior {
            PriceColor::Down
        } else {
            PriceColor::Neutral
        }
    }
}

/// Latest known rate of one symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateEntry {
    /// Display text of the latest close; `None` when unavailable.
    pub price: Option<String>,
    /// Trend color.
    pub color: PriceColor,
}

impl RateEntry {
    /// State of a symbol whose history could not be loaded.
    pub fn unavailable() -> Self {
        RateEntry {
            price: None,
            color: PriceColor::Neutral,
        }
    }

    /// Build the entry for a successfully loaded pair of closes.
    pub fn from_closes(pair: &ClosePair, width: usize, format: PriceFormat) -> Self {
        RateEntry {
            price: Some(format_price(pair.latest, width, format)),
            color: PriceColor::from_closes(pair),
        }
    }

    /// Price text, falling back to `placeholder`.
    pub fn display_price<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.price.as_deref().unwrap_or(placeholder)
    }
}

/// Fit `value` into at most `width` characters.
///
/// `Truncate` keeps the first `width` characters of the shortest round-trip
/// decimal text (`12.0` stays `12.0`, `12345.6789` becomes `12345.6`).
/// `Round` rounds to the number of decimals that fit, including when the
/// rounding carries into a new integer digit (`99.99999` at width 7 becomes
/// `100.000`); when the integer part alone is wider than `width` it is shown
/// whole.
pub fn format_price(value: f64, width: usize, format: PriceFormat) -> String {
    match format {
        PriceFormat::Truncate => format!("{:?}", value).chars().take(width).collect(),
        PriceFormat::Round => {
            let integer_len = format!("{:.0}", value.trunc()).len();
            let mut decimals = width.saturating_sub(integer_len + 1);
            loop {
                let text = format!("{:.*}", decimals, value);
                if text.len() <= width || decimals == 0 {
                    return text;
                }
                decimals -= 1;
            }
        }
    }
}
