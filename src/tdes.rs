//! Triple-DES single-block primitive
//!
//! ECB, one block per call. Double-length keys are expanded to the
//! K1 || K2 || K1 keying option before the cipher is built.

use crate::error::DukptError;
use crate::helpers::to_block;
use crate::types::{DataBlock, BLOCK_SIZE, DOUBLE_KEY_SIZE, TRIPLE_KEY_SIZE};
use des::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use des::TdesEde3;
use zeroize::Zeroizing;

/// Resolve 16- or 24-byte key material to a fresh 24-byte buffer
pub(crate) fn expand_key(key: &[u8]) -> Result<Zeroizing<[u8; TRIPLE_KEY_SIZE]>, DukptError> {
    let mut expanded = Zeroizing::new([0u8; TRIPLE_KEY_SIZE]);
    match key.len() {
        DOUBLE_KEY_SIZE => {
            expanded[..DOUBLE_KEY_SIZE].copy_from_slice(key);
            expanded[DOUBLE_KEY_SIZE..].copy_from_slice(&key[..BLOCK_SIZE]);
        }
        TRIPLE_KEY_SIZE => expanded.copy_from_slice(key),
        got => {
            return Err(DukptError::InvalidKeyLength {
                expected: "16 or 24",
                got,
            })
        }
    }
    Ok(expanded)
}

/// Create a Triple-DES cipher from 16- or 24-byte key material
pub fn create_tdes_cipher(key: &[u8]) -> Result<TdesEde3, DukptError> {
    let expanded = expand_key(key)?;
    TdesEde3::new_from_slice(expanded.as_slice()).map_err(|_| DukptError::CipherInit)
}

/// Encrypt one 8-byte block with Triple-DES (ECB)
pub fn encrypt_block(key: &[u8], block: &[u8]) -> Result<DataBlock, DukptError> {
    let cipher = create_tdes_cipher(key)?;
    let mut out = to_block(block)?;
    cipher.encrypt_block(GenericArray::from_mut_slice(&mut out));
    Ok(out)
}

/// Decrypt one 8-byte block with Triple-DES (ECB)
pub fn decrypt_block(key: &[u8], block: &[u8]) -> Result<DataBlock, DukptError> {
    let cipher = create_tdes_cipher(key)?;
    let mut out = to_block(block)?;
    cipher.decrypt_block(GenericArray::from_mut_slice(&mut out));
    Ok(out)
}
