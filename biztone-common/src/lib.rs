//! # BizTone Common Library
//!
//! Shared code for the BizTone converter service:
//! - Target audiences and their register profiles
//! - API request/response types and input validation
//! - Configuration loading
//! - Error types

pub mod api;
pub mod audience;
pub mod config;
pub mod error;

pub use audience::{Audience, AudienceProfile};
pub use error::{Error, Result};
