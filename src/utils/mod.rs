//! Utility functions.
//!
//! - [`app_data`] - Application data directory and configuration

pub mod app_data;

pub use app_data::*;
