//! Shared test utilities for `barn-buddy`.
//!
//! This module provides fixture builders with sensible defaults and a one-shot stub
//! HTTP server for exercising the spreadsheet client without the network.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{
    config::{AirtableConfig, airtable},
    core::records::{
        ProviderInvoice, ProviderInvoiceStatus, ProviderLines, SpreadsheetRecord,
    },
    entities::DemoState,
};
use chrono::NaiveDate;
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// Builds a calendar date, panicking on an invalid one.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Default demo state with `horse` as the primary horse.
pub fn demo_state(horse: &str) -> DemoState {
    DemoState {
        primary_horse: horse.to_string(),
        ..DemoState::default()
    }
}

/// Spreadsheet row with the given id and `fields` object.
pub fn spreadsheet_record(id: &str, fields: Value) -> SpreadsheetRecord {
    SpreadsheetRecord {
        id: id.to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
        created_time: None,
    }
}

/// Provider invoice with the given amounts in minor units.
///
/// # Defaults
/// * `status`: open
/// * `created`: 2024-07-01T00:00:00Z
/// * `due_date`: none
/// * `customer`: "cus_test"
pub fn provider_invoice(id: &str, amount_due: i64, amount_paid: i64) -> ProviderInvoice {
    ProviderInvoice {
        id: id.to_string(),
        number: None,
        customer: "cus_test".to_string(),
        amount_paid,
        amount_due,
        status: ProviderInvoiceStatus::Open,
        created: 1_719_792_000,
        due_date: None,
        description: None,
        hosted_invoice_url: None,
        invoice_pdf: None,
        lines: ProviderLines::default(),
    }
}

/// Variable lookup backed by a fixed list of pairs.
pub fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| {
        owned
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

/// Spreadsheet configuration with base `appTest` and key `patTest`.
pub fn airtable_config() -> AirtableConfig {
    AirtableConfig::from_lookup(lookup_from(&[
        (airtable::BASE_ID_VAR, "appTest"),
        (airtable::API_KEY_VAR, "patTest"),
    ]))
}

/// Routes log output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// A stub server that answers exactly one request.
pub struct StubServer {
    /// Root URL, e.g. `http://127.0.0.1:40123`
    pub base_url: String,
    /// Resolves to the raw request text once it has been answered
    pub request: JoinHandle<String>,
}

/// Starts a server on a free local port that replies to one request with `status`
/// and a JSON `body`.
pub async fn stub_server(status: u16, body: &str) -> std::io::Result<StubServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let body = body.to_string();

    let request = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("stub accept");
        let request = read_request(&mut stream).await.expect("stub read");
        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason(status),
            body.len(),
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("stub write");
        let _ = stream.shutdown().await;
        request
    });

    Ok(StubServer { base_url, request })
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.trim().eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Decoded query pairs of a captured request, in order.
pub fn query_pairs(request: &str) -> Vec<(String, String)> {
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    reqwest::Url::parse(&format!("http://stub{target}"))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

/// Body of a captured request.
pub fn request_body(request: &str) -> &str {
    request
        .split_once("\r\n\r\n")
        .map_or("", |(_, body)| body)
}
