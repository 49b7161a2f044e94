//! Zeroizing key types and the key serial number
//!
//! Key material produced by this crate is wrapped in [`TdesKey`], which clears
//! its bytes on drop. Every derivation step returns a fresh `TdesKey`; inputs
//! are only ever borrowed.

use crate::error::DukptError;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a single Triple-DES block
pub const BLOCK_SIZE: usize = 8;

/// Size of a double-length key (K1 || K2)
pub const DOUBLE_KEY_SIZE: usize = 16;

/// Size of a triple-length key (K1 || K2 || K3)
pub const TRIPLE_KEY_SIZE: usize = 24;

/// Size of a full key serial number
pub const KSN_SIZE: usize = 10;

/// Largest value the 21-bit transaction counter can hold
pub const MAX_COUNTER: u32 = 0x1F_FFFF;

/// One 8-byte transaction data block
pub type DataBlock = [u8; BLOCK_SIZE];

/// Double-length Triple-DES key (16 bytes) that zeroizes on drop
///
/// Used for the IPEK, every intermediate key in the derivation chain and the
/// final transaction key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct TdesKey(pub(crate) [u8; DOUBLE_KEY_SIZE]);

impl TdesKey {
    /// Create a new key from a 16-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DukptError> {
        if bytes.len() != DOUBLE_KEY_SIZE {
            return Err(DukptError::InvalidKeyLength {
                expected: "16",
                got: bytes.len(),
            });
        }
        let mut key = [0u8; DOUBLE_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(TdesKey(key))
    }

    /// Build a key from its two 8-byte halves into a new buffer
    pub fn from_halves(left: &DataBlock, right: &DataBlock) -> Self {
        let mut key = [0u8; DOUBLE_KEY_SIZE];
        key[..BLOCK_SIZE].copy_from_slice(left);
        key[BLOCK_SIZE..].copy_from_slice(right);
        TdesKey(key)
    }

    /// Get a reference to the key bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Left (K1) half
    pub fn left(&self) -> &[u8] {
        &self.0[..BLOCK_SIZE]
    }

    /// Right (K2) half
    pub fn right(&self) -> &[u8] {
        &self.0[BLOCK_SIZE..]
    }

    /// Upper-case hex rendering of the key
    ///
    /// Exposes the secret; intended for test vectors and the demo CLI.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl AsRef<[u8]> for TdesKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TdesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TdesKey([REDACTED])")
    }
}

/// Key Serial Number (10 bytes)
///
/// The low 21 bits of the last three bytes hold the transaction counter; the
/// remaining bits identify the key set and device.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ksn([u8; KSN_SIZE]);

impl Ksn {
    /// Create a KSN from exactly 10 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DukptError> {
        if bytes.len() != KSN_SIZE {
            return Err(DukptError::InvalidKsnLength { got: bytes.len() });
        }
        let mut ksn = [0u8; KSN_SIZE];
        ksn.copy_from_slice(bytes);
        Ok(Ksn(ksn))
    }

    pub fn as_bytes(&self) -> &[u8; KSN_SIZE] {
        &self.0
    }

    /// The 21-bit transaction counter
    pub fn counter(&self) -> u32 {
        u32::from(self.0[7] & 0x1F) << 16 | u32::from(self.0[8]) << 8 | u32::from(self.0[9])
    }

    /// A copy of this KSN with the counter replaced
    ///
    /// Bits of `counter` above bit 20 are discarded.
    pub fn with_counter(&self, counter: u32) -> Self {
        let counter = counter & MAX_COUNTER;
        let mut ksn = self.0;
        ksn[7] = (ksn[7] & 0xE0) | (counter >> 16) as u8;
        ksn[8] = (counter >> 8) as u8;
        ksn[9] = counter as u8;
        Ksn(ksn)
    }
}

impl AsRef<[u8]> for Ksn {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Ksn {
    type Err = DukptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())?;
        Ksn::from_slice(&bytes)
    }
}

impl fmt::Display for Ksn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Ksn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ksn({})", self)
    }
}
