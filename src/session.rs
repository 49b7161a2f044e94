//! Non-Reversible Key Generation and the transaction key chain
//!
//! [`generate_session_key`] is the one-way round shared by every node of the
//! DUKPT key tree. [`derive_transaction_key`] walks the set bits of the
//! 21-bit transaction counter from least to most significant, applying one
//! round per set bit, and finishes with a round over the full KSN.

use crate::error::DukptError;
use crate::helpers::{mask_ksn_for_session, to_block, transaction_counter, xor_block};
use crate::ipek::generate_ipek;
use crate::tdes::encrypt_block;
use crate::types::{DataBlock, TdesKey, BLOCK_SIZE};
use tracing::{debug, trace};

/// Variant flipping the high 32 bits of each key half for the right round
pub const KEY_VARIANT_MASK: DataBlock = [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00];

/// Number of counter bits walked by the chain
pub const COUNTER_BITS: u32 = 21;

/// One round of the Non-Reversible Key Generation Process
///
/// `key` must be a 16-byte key; `ksn` is 8 to 10 bytes. Returns a new key;
/// neither input is modified.
pub fn generate_session_key(key: impl AsRef<[u8]>, ksn: &[u8]) -> Result<TdesKey, DukptError> {
    let key = TdesKey::from_slice(key.as_ref())?;
    let ksn_masked = mask_ksn_for_session(ksn)?;

    let enc_left = encrypt_block(key.as_slice(), &ksn_masked)?;

    let variant_key = TdesKey::from_halves(
        &xor_block(key.left(), &KEY_VARIANT_MASK)?,
        &xor_block(key.right(), &KEY_VARIANT_MASK)?,
    );
    let enc_right = encrypt_block(variant_key.as_slice(), &ksn_masked)?;

    Ok(TdesKey::from_halves(&enc_left, &enc_right))
}

/// Derive the transaction key for the counter carried in `ksn`
///
/// Starts from the IPEK and applies one [`generate_session_key`] round for
/// each set counter bit, lowest first. The working KSN accumulates every bit
/// already processed. A final round over the original KSN yields the key.
///
/// # Example
///
/// ```
/// use dukpt::{derive_transaction_key, generate_ipek};
///
/// let bdk = hex::decode("0123456789ABCDEFFEDCBA9876543210").unwrap();
/// let ksn = hex::decode("FFFF9876543210E00001").unwrap();
///
/// let ipek = generate_ipek(&bdk, &ksn).unwrap();
/// let key = derive_transaction_key(&ipek, &ksn).unwrap();
/// assert_eq!(key.as_slice().len(), 16);
/// ```
pub fn derive_transaction_key(ipek: impl AsRef<[u8]>, ksn: &[u8]) -> Result<TdesKey, DukptError> {
    let ipek = ipek.as_ref();
    let counter = transaction_counter(ksn)?;

    let mut working_ksn = to_block(&ksn[..BLOCK_SIZE])?;
    let mut current = TdesKey::from_slice(ipek)?;
    let mut rounds = 0u32;

    for shift in 0..COUNTER_BITS {
        let bit = 1u32 << shift;
        if counter & bit == 0 {
            continue;
        }
        working_ksn[5] |= (bit >> 16) as u8;
        working_ksn[6] |= (bit >> 8) as u8;
        working_ksn[7] |= bit as u8;

        trace!(shift, "key generation round");
        current = generate_session_key(&current, &working_ksn)?;
        rounds += 1;
    }

    debug!(counter, rounds, "derived transaction key");
    generate_session_key(&current, ksn)
}

/// Host-side convenience: BDK + KSN straight to the transaction key
pub fn derive_transaction_key_from_bdk(bdk: &[u8], ksn: &[u8]) -> Result<TdesKey, DukptError> {
    let ipek = generate_ipek(bdk, ksn)?;
    derive_transaction_key(&ipek, ksn)
}
