use crate::error::Error;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::{collections::HashMap, time::Duration};

/// The recorder's view of one HTTP response.
#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status_code: u16,
    pub reason: String,
    pub elapsed: Duration,
    pub headers: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
    pub json: Value,
}

impl ResponseData {
    /// Consumes a live blocking response and extracts everything the
    /// recorder needs from it. The elapsed time is measured by the
    /// caller around the request.
    pub fn from_response(
        response: reqwest::blocking::Response,
        elapsed: Duration,
    ) -> Result<Self, Error> {
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let headers = extract_headers(response.headers());
        let cookies = response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect();

        let text = response.text()?;
        let json = if text.is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // a non-JSON body still belongs in the record
                Err(_) => Value::String(text),
            }
        };

        Ok(Self {
            status_code: status.as_u16(),
            reason,
            elapsed,
            headers,
            cookies,
            json,
        })
    }
}

pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    // it currently ignores header values with opaque characters
    header_map
        .iter()
        .map(|(k, v)| (String::from(k.as_str()), v.to_str()))
        .filter_map(|(key, value)| value.ok().map(|v| (key, String::from(v))))
        .collect::<HashMap<_, _>>()
}
