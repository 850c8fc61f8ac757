//! Yahoo Finance chart API client.
//!
//! `GET {base}/v8/finance/chart/{PAIR}?interval=1d&range=5d` returns parallel
//! arrays of timestamps and OHLCV values. Days without trading carry `null`
//! in the price arrays; those rows are dropped.
use chrono::{DateTime, Utc};
use log::debug;
use rates_common::{Candle, RateError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://query1.finance.yahoo.com";
/// Yahoo rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) rates_panel";

/// Blocking client for the chart endpoint.
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Fetch candles for `pair` (e.g. `BTC-USD`) at the Yahoo `interval` code.
    pub fn fetch_candles(&self, pair: &str, interval: &str) -> Result<Vec<Candle>> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, pair);
        debug!("GET {} interval={}", url, interval);

        let response = self
            .client
            .get(&url)
            .query(&[("interval", interval), ("range", range_for(interval))])
            .send()?;

        if !response.status().is_success() {
            return Err(RateError::Format(format!(
                "{} request failed: {}",
                pair,
                response.status()
            )));
        }

        let body: ChartResponse = response.json()?;
        parse_chart(body)
    }
}

/// Smallest range that still holds a few candles of `interval`.
fn range_for(interval: &str) -> &'static str {
    match interval {
        "1wk" => "3mo",
        "1d" => "5d",
        _ => "1d",
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

fn parse_chart(body: ChartResponse) -> Result<Vec<Candle>> {
    if let Some(err) = body.chart.error {
        return Err(RateError::Format(format!(
            "{}: {}",
            err.code, err.description
        )));
    }

    let result = body
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| RateError::Format("empty chart result".into()))?;
    let series = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut candles: Vec<Candle> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let close = series.close.get(i).copied().flatten()?;
            let timestamp = DateTime::<Utc>::from_timestamp(*ts, 0)?;
            let at = |values: &Vec<Option<f64>>| values.get(i).copied().flatten();
            Some(Candle {
                timestamp,
                open: at(&series.open).unwrap_or(close),
                high: at(&series.high).unwrap_or(close),
                low: at(&series.low).unwrap_or(close),
                close,
                volume: at(&series.volume).unwrap_or(0.0),
            })
        })
        .collect();
    candles.sort_by_key(|c| c.timestamp);
    Ok(candles)
}
