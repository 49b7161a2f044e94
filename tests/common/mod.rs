//! Shared fixtures for dukpt integration tests

#![allow(dead_code)]

/// Sample BDK from the ANSI X9.24 test data
pub const BDK_HEX: &str = "0123456789ABCDEFFEDCBA9876543210";

/// Sample KSN with transaction counter 1
pub const KSN_HEX: &str = "FFFF9876543210E00001";

/// "12345678" in ASCII
pub const DATA_HEX: &str = "3132333435363738";

pub const IPEK_HEX: &str = "6AC292FAA1315B4D858AB3A3D7D5933A";
pub const SESSION_KEY_HEX: &str = "BC414A31393FFA13820EF3FB869B12DB";
pub const CIPHERTEXT_HEX: &str = "5F865582DE3A05AB";

/// Decode a hex fixture, panicking on malformed test data
pub fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("invalid hex fixture")
}

/// Number of byte positions at which two buffers differ
pub fn differing_bytes(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}
