use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Window bounds violate `0 <= start < end <= elapse`. Fatal to the one
    /// request only.
    #[error("window [{start}, {end}) out of range for elapse {elapse}")]
    WindowOutOfRange { start: i64, end: i64, elapse: u32 },

    /// JSON content failed to parse into the expected shape. Fails the
    /// specific request; previously loaded state stays intact.
    #[error("malformed content in {file}: {source}")]
    Format {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A decoded packed vector's length disagrees with the Meta-derived
    /// expected length.
    #[error("packed vector length mismatch in {file} for edge {edge}: expected {expected}, got {actual}")]
    VectorLength {
        file: String,
        edge: String,
        expected: usize,
        actual: usize,
    },

    /// A file the trace cannot function without (`meta.json`) is absent.
    #[error("missing required trace file: {0}")]
    MissingFile(String),

    #[error("trace source not initialized")]
    NotInitialized,
}
