//! DUKPT Prelude
//!
//! ```rust
//! use dukpt::prelude::*;
//!
//! # fn example() -> Result<(), DukptError> {
//! let ksn: Ksn = "FFFF9876543210E00001".parse()?;
//! let bdk = hex::decode("0123456789ABCDEFFEDCBA9876543210")?;
//! let key = derive_transaction_key_from_bdk(&bdk, ksn.as_ref())?;
//! let _ciphertext = encrypt_data(&key, b"12345678")?;
//! # Ok(())
//! # }
//! ```

pub use crate::codec::{decrypt_data, encrypt_data};
pub use crate::error::DukptError;
pub use crate::ipek::generate_ipek;
pub use crate::session::{
    derive_transaction_key, derive_transaction_key_from_bdk, generate_session_key,
};
pub use crate::types::{DataBlock, Ksn, TdesKey};
