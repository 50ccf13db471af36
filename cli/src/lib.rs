//! Terminal front end for the fasting log service.
//!
//! Parses arguments, drives a `LogController` for one command, and renders
//! its state as plain text.

pub mod args;
pub mod commands;
pub mod telemetry;
pub mod view;
