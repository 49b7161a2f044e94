//! Transaction data encryption under a derived session key
//!
//! Exactly one 8-byte block per call. Chaining and padding of longer
//! messages are left to the caller.

use crate::error::DukptError;
use crate::tdes::{decrypt_block, encrypt_block};
use crate::types::DataBlock;

/// Encrypt one transaction data block
///
/// # Example
///
/// ```
/// use dukpt::{decrypt_data, derive_transaction_key_from_bdk, encrypt_data};
///
/// let bdk = hex::decode("0123456789ABCDEFFEDCBA9876543210").unwrap();
/// let ksn = hex::decode("FFFF9876543210E00001").unwrap();
/// let key = derive_transaction_key_from_bdk(&bdk, &ksn).unwrap();
///
/// let ciphertext = encrypt_data(&key, b"12345678").unwrap();
/// assert_eq!(&decrypt_data(&key, &ciphertext).unwrap(), b"12345678");
/// ```
pub fn encrypt_data(
    session_key: impl AsRef<[u8]>,
    plaintext: &[u8],
) -> Result<DataBlock, DukptError> {
    encrypt_block(session_key.as_ref(), plaintext)
}

/// Decrypt one transaction data block
pub fn decrypt_data(
    session_key: impl AsRef<[u8]>,
    ciphertext: &[u8],
) -> Result<DataBlock, DukptError> {
    decrypt_block(session_key.as_ref(), ciphertext)
}
