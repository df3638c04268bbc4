#![no_main]

use bigint::{BigInt, BASE};
use libfuzzer_sys::fuzz_target;

/// Decode the byte stream into an operand, four bytes per digit.
fn decode(bytes: &[u8]) -> BigInt {
    let base = BigInt::from(BASE);
    let mut acc = BigInt::ZERO;
    for chunk in bytes.chunks(4) {
        let mut raw = [0u8; 4];
        raw[..chunk.len()].copy_from_slice(chunk);
        let digit = u32::from_le_bytes(raw) & (BASE - 1);
        acc = &acc * &base + BigInt::from(digit);
    }
    acc
}

fuzz_target!(|data: &[u8]| {
    let mid = data.len() / 2;
    let x = decode(&data[..mid]);
    let y = decode(&data[mid..]);

    assert_eq!(&x + &y, &y + &x);
    assert_eq!(&x * &y, &y * &x);
    assert_eq!(&(&x + &y) - &y, x);

    let product = &x * &y;
    assert_ne!(product.digits().last(), Some(&0));
});
