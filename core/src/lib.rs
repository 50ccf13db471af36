//! API client core for the fasting log service.
//!
//! # Overview
//! `FastLogClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A
//! `Transport` performs the round-trip, and `LogController` keeps an
//! in-memory collection of entries reconciled with every settled call.
//!
//! # Design
//! - `FastLogClient` is stateless; it holds only the collection URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::FastLogClient;
pub use config::{ClientConfig, ConfigError};
pub use controller::{Action, ActionError, LogController, LogState, Phase, Status};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{FastLog, FastLogForm, FastType};
