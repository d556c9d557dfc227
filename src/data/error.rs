use thiserror::Error;

/// Structured failures of the data layer. Wrapped in `anyhow::Error` with
/// file context by the loader and exporter.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("expected a top-level JSON array of records")]
    JsonNotArray,
    #[error("row {0} is not a JSON object")]
    JsonRowNotObject(usize),
}
