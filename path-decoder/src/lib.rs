//! Request-target path decoding for HTTP servers.
//!
//! [`decoder`] holds the normalization itself; the rest is the small service
//! shell that puts it in front of routing.

pub mod config;
pub mod decoder;
pub mod metrics;
pub mod server;
pub mod telemetry;

pub use decoder::{get_path_from_raw_target, DecodeError};
