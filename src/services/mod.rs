//! Service layer for business logic
//!
//! This module provides unified business logic that can be shared between
//! different interfaces (JSON API, redirect handler).

mod link_service;

pub use link_service::*;
