use crate::{
    config::RecorderConfiguration, data::ResponseData, endpoint::Endpoint, error::Error,
    freeze::freeze,
};
use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fmt::Display, fs, path::PathBuf};

/// A persisted record of one HTTP request/response transaction.
///
/// Field order is the serialized key order, chosen for human-readable
/// output. A snapshot is complete and self-describing: enough to
/// reconstruct a mock response for testing. It is never mutated after
/// being saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: String,
    pub host: String,
    pub url: String,
    pub method: String,
    pub path: Vec<String>,
    pub query: Option<Value>,
    pub request_json: Option<Value>,
    pub response_json: Value,
    pub request_headers: Option<HashMap<String, String>>,
    pub response_headers: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} /{} at {}", self.method, self.path.join("/"), self.timestamp)
    }
}

/// A chatty wrapper around the API transaction.
///
/// In freeze mode, the snapshot gets stripped of its secrets and saved
/// inside the shared snapshots folder, so freezing is a cheap way to
/// generate (quasi) specs for the API.
#[derive(Debug)]
pub struct SnapshotRecorder {
    config: RecorderConfiguration,
}

impl SnapshotRecorder {
    pub fn new(config: RecorderConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecorderConfiguration {
        &self.config
    }

    /// Log, record and save one transaction, returning the record.
    pub fn record(
        &self,
        endpoint: &Endpoint,
        url: &str,
        response: &ResponseData,
        params: Option<&Value>,
        request_headers: Option<&HashMap<String, String>>,
        request_json: Option<&Value>,
    ) -> Result<Snapshot, Error> {
        self.log_transaction(endpoint, url, response, params, request_headers, request_json)?;
        let snapshot = self.build_record(endpoint, url, response, params, request_headers, request_json);
        self.save(&snapshot, endpoint)?;
        Ok(snapshot)
    }

    // Is there such a thing as too much logging?
    fn log_transaction(
        &self,
        endpoint: &Endpoint,
        url: &str,
        response: &ResponseData,
        params: Option<&Value>,
        request_headers: Option<&HashMap<String, String>>,
        request_json: Option<&Value>,
    ) -> Result<(), Error> {
        let marker = |stage: &str| {
            format!(
                " [{}] {} - {} ({}) ",
                response.status_code, response.reason, endpoint, stage
            )
        };

        debug!("{:*^100}", marker("begin"));

        debug!("Request endpoint: {}", endpoint.url(self.config.host()));
        debug!("Request time: {:?}", response.elapsed);
        debug!("Request parameters: {:?}", params);
        debug!("Request payload: {:?}", request_json);
        debug!("Request headers: {:?}", request_headers);
        debug!("Response headers: {:?}", response.headers);
        debug!("Response payload: {}", response.json);
        debug!("Response cookies: {:?}", response.cookies);
        debug!("Request full URL: {}", url);

        if self.config.expanded_log_style() {
            debug!("{}", serde_json::to_string_pretty(&response.json)?);
        }

        debug!("{:*^100}", marker("end"));

        Ok(())
    }

    /// Store the transaction info. The response payload is cloned
    /// before any redaction so the caller's response is never mutated.
    fn build_record(
        &self,
        endpoint: &Endpoint,
        url: &str,
        response: &ResponseData,
        params: Option<&Value>,
        request_headers: Option<&HashMap<String, String>>,
        request_json: Option<&Value>,
    ) -> Snapshot {
        let mut response_json = response.json.clone();

        if self.config.freeze_mode() {
            freeze(&mut response_json);
        }

        Snapshot {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            host: self.config.host().to_string(),
            url: url.to_string(),
            method: endpoint.method().to_string(),
            path: endpoint.path().to_vec(),
            query: params.cloned(),
            request_json: request_json.cloned(),
            response_json,
            request_headers: request_headers.cloned(),
            response_headers: response.headers.clone(),
            cookies: response.cookies.clone(),
        }
    }

    /// Save the snapshot as JSON in the appropriate place: frozen
    /// snapshots go to the shared snapshots folder, live ones to the
    /// user's scratch folder. An existing file is overwritten.
    fn save(&self, snapshot: &Snapshot, endpoint: &Endpoint) -> Result<(), Error> {
        let path = self.filepath(endpoint);
        fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
        debug!("Saved request + response to {}", path.display());
        Ok(())
    }

    fn filepath(&self, endpoint: &Endpoint) -> PathBuf {
        let folder = if self.config.freeze_mode() {
            self.config.snapshots_dir()
        } else {
            self.config.user_dir()
        };

        folder.join(endpoint.filename())
    }
}
