//! Bybit v5 kline client.
use chrono::{DateTime, Utc};
use log::debug;
use rates_common::{Candle, RateError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.bybit.com";
/// Enough history for a prior/latest pair even if the current candle is missing.
const KLINE_LIMIT: usize = 5;

/// Blocking client for `/v5/market/kline`.
pub struct BybitClient {
    client: Client,
    base_url: String,
}

impl BybitClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Fetch spot klines for `pair` (e.g. `BTCUSDT`) at the Bybit `interval` code.
    ///
    /// Bybit lists newest first; the result is re-sorted oldest first.
    pub fn fetch_candles(&self, pair: &str, interval: &str) -> Result<Vec<Candle>> {
        let url = format!("{}/v5/market/kline", self.base_url);
        let limit = KLINE_LIMIT.to_string();
        debug!("GET {} symbol={} interval={}", url, pair, interval);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("category", "spot"),
                ("symbol", pair),
                ("interval", interval),
                ("limit", limit.as_str()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(RateError::Format(format!(
                "{} request failed: {}",
                pair,
                response.status()
            )));
        }

        let body: KlineResponse = response.json()?;
        parse_klines(body)
    }
}

#[derive(Debug, Deserialize)]
struct KlineResponse {
    #[serde(rename = "retCode")]
    ret_code: i32,
    #[serde(rename = "retMsg")]
    ret_msg: String,
    result: Option<KlineResult>,
}

#[derive(Debug, Deserialize)]
struct KlineResult {
    #[serde(default)]
    list: Vec<Vec<String>>,
}

fn parse_klines(body: KlineResponse) -> Result<Vec<Candle>> {
    if body.ret_code != 0 {
        return Err(RateError::Format(format!(
            "Bybit error {}: {}",
            body.ret_code, body.ret_msg
        )));
    }

    let rows = body.result.map(|r| r.list).unwrap_or_default();
    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        candles.push(parse_row(&row)?);
    }
    candles.sort_by_key(|c| c.timestamp);
    Ok(candles)
}

/// `[startTime, open, high, low, close, volume, turnover]`, all strings.
fn parse_row(row: &[String]) -> Result<Candle> {
    if row.len() < 6 {
        return Err(RateError::Format(format!(
            "kline row has {} fields, expected at least 6",
            row.len()
        )));
    }
    let number = |i: usize| {
        row[i]
            .parse::<f64>()
            .map_err(|e| RateError::Format(format!("bad kline field {:?}: {}", row[i], e)))
    };
    let millis = row[0]
        .parse::<i64>()
        .map_err(|e| RateError::Format(format!("bad kline start {:?}: {}", row[0], e)))?;
    let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| RateError::Format(format!("kline start out of range: {}", millis)))?;

    Ok(Candle {
        timestamp,
        open: number(1)?,
        high: number(2)?,
        low: number(3)?,
        close: number(4)?,
        volume: number(5)?,
    })
}
