//! Error types for screenplay import.

use thiserror::Error;

/// Import failures.
///
/// Every variant is fatal to a single import call. Plain-text input never
/// produces one of these; only the ZIP/OSF path can fail.
#[derive(Debug, Error)]
pub enum ImportError {
    /// No end-of-central-directory record, or a structure points outside the archive
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    /// No entry matched the document selection policy
    #[error("No screenplay document found in archive")]
    MissingDocument,

    /// An entry's declared sizes run past the end of the archive
    #[error("Truncated entry '{name}': needs {needed} bytes, archive has {available}")]
    TruncatedEntry {
        name: String,
        needed: u64,
        available: u64,
    },

    /// Compression method other than STORED (0) or DEFLATE (8)
    #[error("Unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    /// ZIP64, encryption or multi-volume archives
    #[error("Unsupported archive feature: {0}")]
    UnsupportedArchiveFeature(String),

    /// The inflater reported an unrecoverable status
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    /// The document entry is not well-formed XML
    #[error("XML parsing error: {0}")]
    XmlParse(String),
}

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;
