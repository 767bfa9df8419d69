//! Error types for the stumbler-model crate.

use thiserror::Error;

/// Errors that can occur while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The MAC address bytes are invalid (must be exactly 6 bytes).
    #[error("invalid MAC address: expected 6 bytes, got {len}")]
    InvalidMac {
        /// The number of bytes that were provided.
        len: usize,
    },

    /// Failed to parse a MAC address string (expected `aa:bb:cc:dd:ee:ff`).
    #[error("failed to parse MAC address from '{input}': expected aa:bb:cc:dd:ee:ff")]
    MacParseFailed {
        /// The input string that could not be parsed.
        input: String,
    },
}
