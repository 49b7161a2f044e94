//! Initial PIN Encryption Key derivation (ANSI X9.24)
//!
//! The IPEK is two independent Triple-DES encryptions of the counter-zeroed
//! KSN: one under the BDK, one under the BDK XOR-ed with the `C0C0C0C0`
//! variant. The key-injection host can always rebuild it from BDK + KSN.

use crate::error::DukptError;
use crate::helpers::{mask_ksn_for_ipek, xor_block};
use crate::tdes::encrypt_block;
use crate::types::{DataBlock, TdesKey, DOUBLE_KEY_SIZE};
use tracing::debug;

/// Variant applied to both BDK halves for the right half of the IPEK
pub const BDK_VARIANT_MASK: DataBlock = [0xC0, 0xC0, 0xC0, 0xC0, 0x00, 0x00, 0x00, 0x00];

/// Derive the IPEK from a double-length BDK and the device KSN
///
/// Only the first 16 bytes of `bdk` are used; shorter input fails with
/// [`DukptError::InvalidKeyLength`].
///
/// # Example
///
/// ```
/// use dukpt::generate_ipek;
///
/// let bdk = hex::decode("0123456789ABCDEFFEDCBA9876543210").unwrap();
/// let ksn = hex::decode("FFFF9876543210E00001").unwrap();
///
/// let ipek = generate_ipek(&bdk, &ksn).unwrap();
/// assert_eq!(ipek.to_hex(), "6AC292FAA1315B4D858AB3A3D7D5933A");
/// ```
pub fn generate_ipek(bdk: &[u8], ksn: &[u8]) -> Result<TdesKey, DukptError> {
    if bdk.len() < DOUBLE_KEY_SIZE {
        return Err(DukptError::InvalidKeyLength {
            expected: "16",
            got: bdk.len(),
        });
    }
    let ksn_masked = mask_ksn_for_ipek(ksn)?;

    let base_key = TdesKey::from_slice(&bdk[..DOUBLE_KEY_SIZE])?;
    let ipek_left = encrypt_block(base_key.as_slice(), &ksn_masked)?;

    let variant_key = TdesKey::from_halves(
        &xor_block(base_key.left(), &BDK_VARIANT_MASK)?,
        &xor_block(base_key.right(), &BDK_VARIANT_MASK)?,
    );
    let ipek_right = encrypt_block(variant_key.as_slice(), &ksn_masked)?;

    debug!(ksn = %hex::encode_upper(ksn_masked), "derived IPEK");
    Ok(TdesKey::from_halves(&ipek_left, &ipek_right))
}
