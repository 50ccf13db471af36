//! Stateless HTTP request builder and response parser for the fasting log API.
//!
//! # Design
//! `FastLogClient` holds only the collection URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Any 2xx status is success.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{FastLog, FastLogForm};

/// Path of the fasting log collection below the configured origin.
pub const COLLECTION_PATH: &str = "/api/fastlogs";

/// Detail of the `Deserialization` error for a server entry without an id.
pub const MISSING_ID: &str = "entry has no id";

/// Synchronous, stateless client for the fasting log API.
#[derive(Debug, Clone)]
pub struct FastLogClient {
    base_url: String,
}

impl FastLogClient {
    /// Client for the collection at `origin` + `/api/fastlogs`.
    pub fn new(origin: &str) -> Self {
        Self {
            base_url: format!("{}{COLLECTION_PATH}", origin.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.base_url.clone(), None)
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, self.entry_url(id), None)
    }

    pub fn build_create(&self, form: &FastLogForm) -> Result<HttpRequest, ApiError> {
        let body = encode(form)?;
        Ok(self.request(HttpMethod::Post, self.base_url.clone(), Some(body)))
    }

    pub fn build_update(&self, id: i64, form: &FastLogForm) -> Result<HttpRequest, ApiError> {
        let body = encode(form)?;
        Ok(self.request(HttpMethod::Put, self.entry_url(id), Some(body)))
    }

    pub fn build_mark_complete(&self, id: i64) -> HttpRequest {
        self.request(
            HttpMethod::Patch,
            format!("{}/complete", self.entry_url(id)),
            None,
        )
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, self.entry_url(id), None)
    }

    /// An empty 2xx body decodes as an empty collection.
    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<FastLog>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let logs: Vec<FastLog> = decode(&response.body)?;
        for log in &logs {
            require_id(log)?;
        }
        Ok(logs)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<FastLog, ApiError> {
        parse_entry(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<FastLog, ApiError> {
        parse_entry(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<FastLog, ApiError> {
        parse_entry(response)
    }

    pub fn parse_mark_complete(&self, response: HttpResponse) -> Result<FastLog, ApiError> {
        parse_entry(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn entry_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }

    // Every request advertises JSON, matching what the backend expects.
    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

/// Map non-2xx responses to `ApiError::Request`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, &response.body))
}

fn parse_entry(response: HttpResponse) -> Result<FastLog, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Err(ApiError::EmptyBody(response.status));
    }
    let log = decode(&response.body)?;
    require_id(&log)?;
    Ok(log)
}

/// Entries coming back from the server must be persisted ones.
fn require_id(log: &FastLog) -> Result<(), ApiError> {
    match log.id {
        Some(_) => Ok(()),
        None => Err(ApiError::Deserialization(MISSING_ID.to_string())),
    }
}

fn encode(form: &FastLogForm) -> Result<String, ApiError> {
    serde_json::to_string(form).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
