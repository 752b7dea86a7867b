//! Adroit - A concurrency-safe URL shortener service
//!
//! This library provides the core functionality for the Adroit service,
//! including short code allocation, click tracking, storage backends and
//! the HTTP API.
//!
//! # Architecture
//! - `storage`: Storage backends and data access
//! - `services`: Link lifecycle and click tracking
//! - `api`: HTTP services (management API, redirects, health)
//! - `config`: Configuration management
//! - `runtime`: Server startup and execution
//! - `system`: Logging and system utilities

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
