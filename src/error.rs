use thiserror::Error;

/// Failure taxonomy for upstream sources.
///
/// Every fetch or extract step reports one of these; no failure crosses the
/// aggregator boundary as a panic. Callers degrade to a cached value or an
/// unavailable marker.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network error, timeout, or non-2xx status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Body is not valid JSON or does not match the expected shape.
    #[error("parse failure: {0}")]
    Parse(String),

    /// Expected field absent, non-numeric, or the series is empty.
    #[error("missing field: {0}")]
    FieldMissing(String),
}
