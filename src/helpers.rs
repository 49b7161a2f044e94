//! Byte utilities shared by the derivation steps
//!
//! All helpers allocate their output; no input slice is modified.

use crate::error::DukptError;
use crate::types::{DataBlock, BLOCK_SIZE};

/// Element-wise XOR of two equal-length byte slices
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>, DukptError> {
    if a.len() != b.len() {
        return Err(DukptError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// XOR an 8-byte half key with an 8-byte variant mask
pub(crate) fn xor_block(half: &[u8], mask: &DataBlock) -> Result<DataBlock, DukptError> {
    to_block(&xor(half, mask)?)
}

/// Copy a slice into a fresh 8-byte block
pub(crate) fn to_block(bytes: &[u8]) -> Result<DataBlock, DukptError> {
    bytes
        .try_into()
        .map_err(|_| DukptError::InvalidBlockLength { got: bytes.len() })
}

/// Reject KSNs outside the 8..=10 byte range
pub(crate) fn check_ksn(ksn: &[u8]) -> Result<(), DukptError> {
    if !(8..=10).contains(&ksn.len()) {
        return Err(DukptError::InvalidKsnLength { got: ksn.len() });
    }
    Ok(())
}

/// Zero the transaction counter bits for IPEK derivation
///
/// Copies the first 8 bytes of `ksn` and clears the low 5 bits of the last
/// one.
pub fn mask_ksn_for_ipek(ksn: &[u8]) -> Result<DataBlock, DukptError> {
    check_ksn(ksn)?;
    let mut masked = to_block(&ksn[..BLOCK_SIZE])?;
    masked[7] &= 0xE0;
    Ok(masked)
}

/// KSN block fed to one round of the non-reversible key generation
///
/// Takes bytes `2..10` of the KSN (fewer when the KSN is shorter, leaving the
/// tail zero), clears the low 5 bits of byte 5 and zeroes bytes 6 and 7.
pub(crate) fn mask_ksn_for_session(ksn: &[u8]) -> Result<DataBlock, DukptError> {
    check_ksn(ksn)?;
    let tail = &ksn[2..];
    let mut masked = [0u8; BLOCK_SIZE];
    masked[..tail.len()].copy_from_slice(tail);
    masked[5] &= 0xE0;
    masked[6] = 0x00;
    masked[7] = 0x00;
    Ok(masked)
}

/// The 21-bit transaction counter held in the last three KSN bytes
pub fn transaction_counter(ksn: &[u8]) -> Result<u32, DukptError> {
    check_ksn(ksn)?;
    let n = ksn.len();
    Ok(u32::from(ksn[n - 3] & 0x1F) << 16
        | u32::from(ksn[n - 2]) << 8
        | u32::from(ksn[n - 1]))
}
