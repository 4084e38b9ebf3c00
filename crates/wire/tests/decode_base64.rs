//! Tests for transport base64 decoding (from_base64).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::Rng;
use somnolog_wire::{from_base64, to_base64, Base64Error};

fn generate_blob() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let length = rng.gen_range(0..=100);
    (0..length).map(|_| rng.gen::<u8>()).collect()
}

#[test]
fn works() {
    for _ in 0..100 {
        let blob = generate_blob();
        let encoded = STANDARD.encode(&blob);
        assert_eq!(from_base64(&encoded).unwrap(), blob);
    }
}

#[test]
fn roundtrips_own_encoder() {
    for _ in 0..100 {
        let blob = generate_blob();
        assert_eq!(from_base64(&to_base64(&blob)).unwrap(), blob);
    }
}

#[test]
fn handles_invalid_values() {
    for _ in 0..100 {
        let blob = generate_blob();
        let invalid = format!("{}!!!!", to_base64(&blob));
        assert_eq!(from_base64(&invalid), Err(Base64Error::InvalidSymbol));
    }
}

#[test]
fn rejects_ragged_lengths() {
    assert_eq!(from_base64("Q"), Err(Base64Error::InvalidLength));
    assert_eq!(from_base64("QUJ"), Err(Base64Error::InvalidLength));
    assert_eq!(from_base64("QUJDR"), Err(Base64Error::InvalidLength));
}

#[test]
fn rejects_interior_padding() {
    assert_eq!(from_base64("Zg==Zm9v"), Err(Base64Error::InvalidSymbol));
    assert_eq!(from_base64("A==="), Err(Base64Error::InvalidSymbol));
}

#[test]
fn empty_input() {
    assert_eq!(from_base64("").unwrap(), b"");
}

#[test]
fn hello_world() {
    assert_eq!(from_base64("aGVsbG8gd29ybGQ=").unwrap(), b"hello world");
}
