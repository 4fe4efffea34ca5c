//! Yahoo Finance Quote Provider
//!
//! Unterstützt:
//! - Aktuelle Kurse (Latest)
//! - Historische Kurse (Daily)

use super::LiveFeed;
use crate::models::{SeriesPoint, SeriesRange};
use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart-API implementation of [`LiveFeed`]
#[derive(Debug, Default, Clone, Copy)]
pub struct YahooFeed;

/// HTTP Client mit korrekten Headers erstellen
fn create_client() -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))
}

/// Symbol URL erstellen (encoded)
fn symbol_url(symbol: &str) -> String {
    let encoded = urlencoding::encode(symbol);
    format!("{}/{}", BASE_URL, encoded)
}

/// Chart-Daten für ein Symbol und einen Zeitraum abrufen
async fn fetch_chart(symbol: &str, range: &str) -> Result<serde_json::Value> {
    let url = format!("{}?interval=1d&range={}", symbol_url(symbol), range);
    log::debug!("Fetching Yahoo chart for {} from {}", symbol, url);

    let client = create_client()?;
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| anyhow!("Request failed for {}: {}", symbol, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("Yahoo API error for {}: {} - {}", symbol, status, body);
        return Err(anyhow!("HTTP error for {}: {} - {}", symbol, status, body));
    }

    let data: serde_json::Value = response
        .json()
        .await
        .map_err(|e| anyhow!("Failed to parse JSON for {}: {}", symbol, e))?;

    // Check for Yahoo API error in response
    if let Some(error) = data.get("chart").and_then(|c| c.get("error")).and_then(|e| e.as_object()) {
        let code = error.get("code").and_then(|c| c.as_str()).unwrap_or("unknown");
        let desc = error.get("description").and_then(|d| d.as_str()).unwrap_or("No description");
        log::error!("Yahoo API returned error for {}: {} - {}", symbol, code, desc);
        return Err(anyhow!("Yahoo API error for {}: {} - {}", symbol, code, desc));
    }

    Ok(data)
}

impl LiveFeed for YahooFeed {
    async fn latest_price(&self, symbol: &str) -> Result<Option<f64>> {
        let data = fetch_chart(symbol, "1d").await?;
        Ok(parse_latest_price(&data))
    }

    async fn last_daily_close(&self, symbol: &str) -> Result<Option<f64>> {
        let data = fetch_chart(symbol, "1d").await?;
        Ok(parse_last_close(&data))
    }

    async fn daily_series(&self, symbol: &str, range: SeriesRange) -> Result<Vec<SeriesPoint>> {
        let data = fetch_chart(symbol, range.as_str()).await?;
        parse_series_points(&data)
    }
}

fn chart_result(data: &serde_json::Value) -> Option<&serde_json::Value> {
    data.get("chart").and_then(|c| c.get("result")).and_then(|r| r.get(0))
}

fn close_array(chart: &serde_json::Value) -> Option<&Vec<serde_json::Value>> {
    chart
        .get("indicators")
        .and_then(|i| i.get("quote"))
        .and_then(|q| q.get(0))
        .and_then(|q| q.get("close"))
        .and_then(|c| c.as_array())
}

/// Aktuellen Kurs aus Yahoo Response parsen
///
/// `meta.regularMarketPrice` zuerst, sonst letzter nicht-leerer Close.
fn parse_latest_price(data: &serde_json::Value) -> Option<f64> {
    let chart = chart_result(data)?;

    chart
        .get("meta")
        .and_then(|m| m.get("regularMarketPrice"))
        .and_then(|p| p.as_f64())
        .or_else(|| {
            close_array(chart)
                .and_then(|arr| arr.iter().rev().find_map(|v| v.as_f64()))
        })
}

/// Letzten Tages-Close aus Yahoo Response parsen
fn parse_last_close(data: &serde_json::Value) -> Option<f64> {
    let chart = chart_result(data)?;
    close_array(chart).and_then(|arr| arr.iter().rev().find_map(|v| v.as_f64()))
}

/// Historische Kurse aus Yahoo Response parsen
fn parse_series_points(data: &serde_json::Value) -> Result<Vec<SeriesPoint>> {
    let chart = chart_result(data).ok_or_else(|| anyhow!("Invalid response format"))?;

    let timestamps = chart
        .get("timestamp")
        .and_then(|t| t.as_array())
        .ok_or_else(|| anyhow!("Missing timestamps"))?;

    let closes = close_array(chart).ok_or_else(|| anyhow!("Missing close prices"))?;

    let mut points = Vec::new();

    for (i, ts) in timestamps.iter().enumerate() {
        let timestamp = ts.as_i64().unwrap_or(0);
        let time = match chrono::DateTime::from_timestamp(timestamp, 0) {
            Some(dt) => dt.naive_utc(),
            None => continue,
        };

        // Skip trading days without a close
        let close = match closes.get(i).and_then(|v| v.as_f64()) {
            Some(c) => c,
            None => continue,
        };

        points.push(SeriesPoint { time, close });
    }

    Ok(points)
}
