//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output: payload plus when and by which version it was produced
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub timestamp: String,
    pub version: &'static str,
}

/// Wrap `data` in the envelope and pretty-print it
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput {
        data,
        meta: Metadata {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        },
    };
    serde_json::to_string_pretty(&output)
}
