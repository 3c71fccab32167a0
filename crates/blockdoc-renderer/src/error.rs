//! Error types for block rendering.

/// Error from a block renderer.
///
/// The document omits a block whose renderer fails; the error only reaches
/// the log.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Block data does not match the block's schema.
    #[error("invalid {block_type} data")]
    InvalidData {
        /// Block type being rendered.
        block_type: &'static str,
        /// Deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// Block data is well-formed but unsafe or unsupported.
    #[error("{block_type}: {message}")]
    Rejected {
        /// Block type being rendered.
        block_type: &'static str,
        /// Why the block was refused.
        message: String,
    },
}
