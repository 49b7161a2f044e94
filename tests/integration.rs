mod common;

use common::*;
use dukpt::{
    decrypt_data, derive_transaction_key, encrypt_data, generate_ipek, generate_session_key, Ksn,
    MAX_COUNTER,
};
use proptest::prelude::*;
use rand::{rngs::OsRng, RngCore};

#[test]
fn test_end_to_end_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let ksn = bytes(KSN_HEX);
    let data = bytes(DATA_HEX);

    let ipek = generate_ipek(&bdk, &ksn)?;
    assert_eq!(ipek.to_hex(), IPEK_HEX);

    let session_key = derive_transaction_key(&ipek, &ksn)?;
    assert_eq!(session_key.to_hex(), SESSION_KEY_HEX);

    let encrypted = encrypt_data(&session_key, &data)?;
    assert_eq!(hex::encode_upper(encrypted), CIPHERTEXT_HEX);

    let decrypted = decrypt_data(&session_key, &encrypted)?;
    assert_eq!(decrypted.as_slice(), data.as_slice());
    assert_eq!(std::str::from_utf8(&decrypted)?, "12345678");

    Ok(())
}

#[test]
fn test_typed_ksn_matches_raw_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let ksn: Ksn = KSN_HEX.parse()?;

    let ipek = generate_ipek(&bdk, ksn.as_ref())?;
    let typed = derive_transaction_key(&ipek, ksn.as_ref())?;
    let raw = derive_transaction_key(&ipek, &bytes(KSN_HEX))?;
    assert_eq!(typed, raw);
    Ok(())
}

#[test]
fn test_determinism() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let ksn = bytes("FFFF9876543210E1F0F0");

    let first = derive_transaction_key(generate_ipek(&bdk, &ksn)?, &ksn)?;
    for _ in 0..5 {
        let again = derive_transaction_key(generate_ipek(&bdk, &ksn)?, &ksn)?;
        assert_eq!(first, again);
    }
    Ok(())
}

#[test]
fn test_counter_zero_degenerates_to_single_round() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let ksn = bytes("FFFF9876543210E00000");
    let ipek = generate_ipek(&bdk, &ksn)?;

    assert_eq!(
        derive_transaction_key(&ipek, &ksn)?,
        generate_session_key(ipek.as_slice(), &ksn)?
    );
    Ok(())
}

#[test]
fn test_counter_bit_flip_avalanche() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let base: Ksn = "FFFF9876543210E00000".parse()?;
    let ipek = generate_ipek(&bdk, base.as_ref())?;
    let base_key = derive_transaction_key(&ipek, base.as_ref())?;

    for shift in 0..21 {
        let flipped = base.with_counter(1 << shift);
        let key = derive_transaction_key(&ipek, flipped.as_ref())?;
        assert!(
            differing_bytes(base_key.as_slice(), key.as_slice()) > 4,
            "flipping counter bit {shift} changed too few bytes"
        );
    }
    Ok(())
}

#[test]
fn test_distinct_ksn_keys_differ() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let ksn: Ksn = KSN_HEX.parse()?;
    let ipek = generate_ipek(&bdk, ksn.as_ref())?;

    let low = derive_transaction_key(&ipek, ksn.with_counter(0x000101).as_ref())?;
    let high = derive_transaction_key(&ipek, ksn.with_counter(0x100101).as_ref())?;
    assert_ne!(low, high);
    Ok(())
}

#[test]
fn test_max_counter() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let ksn: Ksn = KSN_HEX.parse()?;
    let saturated = ksn.with_counter(MAX_COUNTER);
    assert_eq!(saturated.counter(), MAX_COUNTER);

    let ipek = generate_ipek(&bdk, saturated.as_ref())?;
    let key = derive_transaction_key(&ipek, saturated.as_ref())?;
    assert_eq!(key.as_slice().len(), 16);
    Ok(())
}

#[test]
fn test_random_bdk_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut bdk = [0u8; 16];
    OsRng.fill_bytes(&mut bdk);
    let ksn = bytes(KSN_HEX);

    let key = derive_transaction_key(generate_ipek(&bdk, &ksn)?, &ksn)?;
    let mut block = [0u8; 8];
    OsRng.fill_bytes(&mut block);

    let ciphertext = encrypt_data(&key, &block)?;
    assert_eq!(decrypt_data(&key, &ciphertext)?, block);
    Ok(())
}

proptest! {
    #[test]
    fn prop_encrypt_decrypt_round_trip(key in prop::array::uniform16(any::<u8>()),
                                       block in prop::array::uniform8(any::<u8>())) {
        let ciphertext = encrypt_data(key, &block).unwrap();
        prop_assert_eq!(decrypt_data(key, &ciphertext).unwrap(), block);
    }

    #[test]
    fn prop_derived_keys_are_sixteen_bytes(bdk in prop::array::uniform16(any::<u8>()),
                                           ksn in prop::collection::vec(any::<u8>(), 8..=10)) {
        let ipek = generate_ipek(&bdk, &ksn).unwrap();
        prop_assert_eq!(ipek.as_slice().len(), 16);
        let key = derive_transaction_key(&ipek, &ksn).unwrap();
        prop_assert_eq!(key.as_slice().len(), 16);
    }

    #[test]
    fn prop_derivation_is_deterministic(bdk in prop::array::uniform16(any::<u8>()),
                                        counter in 0u32..=MAX_COUNTER) {
        let ksn: Ksn = KSN_HEX.parse::<Ksn>().unwrap().with_counter(counter);
        let ipek = generate_ipek(&bdk, ksn.as_ref()).unwrap();
        let first = derive_transaction_key(&ipek, ksn.as_ref()).unwrap();
        let second = derive_transaction_key(generate_ipek(&bdk, ksn.as_ref()).unwrap(), ksn.as_ref())
            .unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_multi_bit_counter_vectors() -> Result<(), Box<dyn std::error::Error>> {
    let bdk = bytes(BDK_HEX);
    let cases = [
        ("FFFF9876543210E00300", "C32D371BD337E8C14EEEA5C44E2E1CA7"),
        ("FFFF9876543210E10300", "2DF4D3D96D37C19499D165B8EC0BF645"),
    ];
    for (ksn_hex, expected) in cases {
        let ksn = bytes(ksn_hex);
        let key = derive_transaction_key(generate_ipek(&bdk, &ksn)?, &ksn)?;
        assert_eq!(key.to_hex(), expected, "ksn {ksn_hex}");
    }
    Ok(())
}
