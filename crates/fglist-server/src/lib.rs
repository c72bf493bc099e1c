//! FortiGate List Manager HTTP Server Library
//!
//! Provides the REST API, web UI and raw export endpoint on top of
//! `fglist-repository`, split out of the binary for testing and reuse.

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;
