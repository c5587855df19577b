pub mod counters;

use prometheus::{Encoder, TextEncoder};

pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render the default registry in the prometheus text format.
pub fn gather_as_text() -> String {
    let mf = prometheus::gather();
    let mut buf = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&mf, &mut buf) {
        tracing::warn!("metrics encode failed: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
