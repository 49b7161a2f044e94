//! Error type for DUKPT operations
//!
//! Every failure is a precondition violation on caller-supplied data. Nothing
//! here is recoverable by retrying: the derivation is a deterministic pure
//! computation, so a call either returns its full result or one of these.
//!
//! # Example
//!
//! ```
//! use dukpt::{encrypt_block, DukptError};
//!
//! let err = encrypt_block(&[0u8; 8], &[0u8; 8]).unwrap_err();
//! assert!(matches!(err, DukptError::InvalidKeyLength { got: 8, .. }));
//! assert!(err.is_key_error());
//! ```

use thiserror::Error;

/// Unified error type for all DUKPT operations
///
/// # Error Categories
///
/// - **Key**: key material of the wrong length, or rejected by the cipher
/// - **Input**: data blocks, KSNs or XOR operands of the wrong length
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DukptError {
    /// Key material is not a double-length (16) or triple-length (24) key
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: &'static str, got: usize },

    /// Cipher input is not exactly one 8-byte block
    #[error("Invalid block length: expected 8, got {got}")]
    InvalidBlockLength { got: usize },

    /// XOR operands differ in length
    #[error("Length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// KSN is shorter than 8 or longer than 10 bytes
    #[error("Invalid KSN length: expected 8 to 10 bytes, got {got}")]
    InvalidKsnLength { got: usize },

    /// The Triple-DES primitive rejected the expanded key material
    #[error("Cipher initialization failed")]
    CipherInit,

    /// Hex input could not be decoded
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl DukptError {
    /// Returns true if the error concerns key material
    pub fn is_key_error(&self) -> bool {
        matches!(self, Self::InvalidKeyLength { .. } | Self::CipherInit)
    }

    /// Returns true if the error concerns a data block, KSN or XOR operand
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBlockLength { .. }
                | Self::LengthMismatch { .. }
                | Self::InvalidKsnLength { .. }
                | Self::Hex(_)
        )
    }

    /// Always false: derivation performs no I/O and has no transient failures
    pub fn is_retryable(&self) -> bool {
        false
    }
}
