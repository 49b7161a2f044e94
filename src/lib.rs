//! DUKPT (Derived Unique Key Per Transaction) for Triple-DES
//!
//! This crate implements the ANSI X9.24 key management scheme used by payment
//! terminals:
//! - IPEK derivation from a Base Derivation Key (BDK) and Key Serial Number (KSN)
//! - The Non-Reversible Key Generation Process walking the 21-bit transaction counter
//! - Single-block Triple-DES encryption of transaction data under the derived key
//!
//! Every operation is a pure function over byte buffers. Derived keys are
//! returned as [`TdesKey`], which clears its memory on drop.
//!
//! # Example
//!
//! ```
//! use dukpt::{decrypt_data, derive_transaction_key, encrypt_data, generate_ipek};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bdk = hex::decode("0123456789ABCDEFFEDCBA9876543210")?;
//! let ksn = hex::decode("FFFF9876543210E00001")?;
//!
//! let ipek = generate_ipek(&bdk, &ksn)?;
//! let session_key = derive_transaction_key(&ipek, &ksn)?;
//!
//! let encrypted = encrypt_data(&session_key, b"12345678")?;
//! assert_eq!(hex::encode_upper(encrypted), "5F865582DE3A05AB");
//! assert_eq!(&decrypt_data(&session_key, &encrypted)?, b"12345678");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod codec;
pub mod error;
pub mod helpers;
pub mod ipek;
pub mod prelude;
pub mod session;
pub mod tdes;
pub mod types;

pub use codec::{decrypt_data, encrypt_data};
pub use error::DukptError;
pub use helpers::{mask_ksn_for_ipek, transaction_counter, xor};
pub use ipek::generate_ipek;
pub use session::{derive_transaction_key, derive_transaction_key_from_bdk, generate_session_key};
pub use tdes::{create_tdes_cipher, decrypt_block, encrypt_block};
pub use types::{DataBlock, Ksn, TdesKey, MAX_COUNTER};
