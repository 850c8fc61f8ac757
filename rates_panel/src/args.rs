//! Command-line arguments for the rate panel.
//!
//! This module defines the CLI interface using `clap` and folds it over the
//! optional JSON config file into the effective `PanelConfig`.
use clap::Parser;
use rates_common::tickers::TickerParser;
use rates_common::{DataSource, PanelConfig, PriceFormat, Result, Ticker};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Crypto exchange-rate panel", long_about = None)]
pub struct Args {
    /// JSON config file; flags below override its values.
    #[clap(long)]
    pub config: Option<String>,

    /// Path to a text file with tickers to display.
    /// Tickers may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub tickers: Option<String>,

    /// Comma-separated tickers to display, e.g. `btc,eth,sol`.
    #[clap(long, value_enum, value_delimiter = ',', ignore_case = true)]
    pub symbols: Option<Vec<Ticker>>,

    /// Market-data source.
    #[clap(long, value_enum)]
    pub source: Option<DataSource>,

    /// Where to write the rendered page.
    #[clap(long)]
    pub output: Option<String>,

    /// Price text shown when a rate is unavailable.
    #[clap(long)]
    pub placeholder: Option<String>,

    /// Maximum number of characters of the price text.
    #[clap(long)]
    pub display_width: Option<usize>,

    /// `truncate` cuts the price text, `round` rounds it.
    #[clap(long)]
    pub price_format: Option<PriceFormat>,

    /// Refresh once, write the page and exit.
    #[clap(long)]
    pub once: bool,
}

impl Args {
    /// Layer defaults, the config file, the ticker file and the flags.
    pub fn into_config(self) -> Result<PanelConfig> {
        let mut config = match &self.config {
            Some(path) => PanelConfig::load(&normalize_path(path))?,
            None => PanelConfig::default(),
        };

        if let Some(path) = &self.tickers {
            let file = File::open(normalize_path(path))?;
            config.symbols = Ticker::parse_from_file(BufReader::new(file))?;
        }
        if let Some(symbols) = self.symbols {
            config.symbols = symbols;
        }
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(output) = &self.output {
            config.output = normalize_path(output);
        }
        if let Some(placeholder) = self.placeholder {
            config.placeholder = placeholder;
        }
        if let Some(width) = self.display_width {
            config.display_width = width;
        }
        if let Some(format) = self.price_format {
            config.price_format = format;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rates_common::RateError;
    use std::io::Write;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rates_panel").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_give_defaults() {
        let config = parse(&[]).into_config().unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "--symbols",
            "eth,BTC",
            "--source",
            "bybit",
            "--placeholder",
            "-",
            "--display-width",
            "10",
            "--price-format",
            "round",
            "--output",
            "\"out/page.html\"",
            "--once",
        ]);
        assert!(args.once);
        let config = args.into_config().unwrap();
        assert_eq!(config.symbols, vec![Ticker::ETH, Ticker::BTC]);
        assert_eq!(config.source, DataSource::Bybit);
        assert_eq!(config.placeholder, "-");
        assert_eq!(config.display_width, 10);
        assert_eq!(config.price_format, PriceFormat::Round);
        assert_eq!(config.output, PathBuf::from("out/page.html"));
    }

    #[test]
    fn flags_win_over_config_file_and_ticker_file() {
        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        write!(config_file, r#"{{ "placeholder": "?", "display_width": 5 }}"#).unwrap();
        let mut ticker_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(ticker_file, "sol, xrp").unwrap();

        let args = parse(&[
            "--config",
            config_file.path().to_str().unwrap(),
            "--tickers",
            ticker_file.path().to_str().unwrap(),
            "--display-width",
            "8",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(config.symbols, vec![Ticker::SOL, Ticker::XRP]);
        assert_eq!(config.placeholder, "?");
        assert_eq!(config.display_width, 8);
    }

    #[test]
    fn zero_width_flag_is_rejected() {
        let result = parse(&["--display-width", "0"]).into_config();
        assert!(matches!(result, Err(RateError::Config(_))));
    }

    #[test]
    fn unknown_symbol_flag_is_a_usage_error() {
        let result = Args::try_parse_from(["rates_panel", "--symbols", "btc,nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn normalize_path_strips_quotes() {
        assert_eq!(
            normalize_path("  \"C:\\rates\\page.html\" "),
            PathBuf::from("C:\\rates\\page.html")
        );
    }
}
