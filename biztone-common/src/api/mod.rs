//! API module for shared HTTP API types
//!
//! # Design Principle
//!
//! This module contains ONLY pure types and validation (no HTTP framework
//! dependencies). The service crate wraps them with Axum extractors and
//! responses.

pub mod types;

pub use types::{ConversionRequest, ConversionResult, ConversionSource, ErrorResponse, InputError};
