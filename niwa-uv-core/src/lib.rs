//! Core library for the NIWA UV proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream source abstraction and its NIWA implementation
//! - Upstream and frontend models
//! - The transform from NIWA products to the frontend series
//!
//! It is used by `niwa-uv-api`, both for the HTTP handler and the CLI.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod transform;

pub use config::{Config, Credentials};
pub use error::{ErrorKind, UvError};
pub use model::{NiwaResponse, Product, UvReading, ValuePair};
pub use provider::{ProductId, UvSource, niwa::NiwaClient, source_from_config, uv_forecast};
pub use transform::{WINDOW_LEN, transform};
