//! This module defines the single, unified error type for the entire codec.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    // =========================================================================
    // === Wire Format Errors (raised while decoding)
    // =========================================================================
    #[error("Invalid encoding: unknown method marker {0:?}")]
    InvalidEncoding(char),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    // =========================================================================
    // === Input Errors (raised while encoding)
    // =========================================================================
    #[error("Value {value} is outside the accepted range [{min}, {max}]")]
    ValueOutOfRange { value: u32, min: u32, max: u32 },

    /// A frequency count does not fit the bit-packed count field. The planner
    /// treats this as a disqualification of the bit-packed candidate.
    #[error("Count {count} of value {value} exceeds the count field maximum {max}")]
    CountSaturated { value: u32, count: usize, max: u32 },

    #[error("Input of {len} values exceeds the decoded length limit {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("Bit field error: value {0} exceeds bit width {1}")]
    FieldOverflow(u64, u8),

    // =========================================================================
    // === Construction Errors
    // =========================================================================
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An error from the Serde JSON library while reading a `CodecConfig`.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}

impl CodecError {
    /// Shorthand used by every decoder.
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CodecError::MalformedPayload(msg.into())
    }
}
