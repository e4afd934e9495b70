//! HTTP API handlers for biztone-api

pub mod convert;
pub mod health;
pub mod ui;

pub use convert::{convert_routes, convert_text};
pub use health::{health_check, health_routes};
pub use ui::{serve_index, ui_routes};
