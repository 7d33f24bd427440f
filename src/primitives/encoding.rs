//! Fixed-width big-endian encodings for group elements, exponents, and challenges.
//!
//! Every value bound by the modulus `p` is written as exactly `ceil(bitlength(p) / 8)` bytes.
//! Challenges always occupy [`CHALLENGE_BYTES`] bytes regardless of the modulus size, which caps
//! the Fiat-Shamir challenge (and the soundness it provides) at 256 bits. That cap is part of the
//! wire format and must not be widened silently.

use num_bigint::BigUint;

use crate::{Error, Result};

/// Width of an encoded Fiat-Shamir challenge.
pub const CHALLENGE_BYTES: usize = 32;

/// Returns the encoded width for values bound by `modulus`.
pub fn byte_width(modulus: &BigUint) -> usize {
    (modulus.bits() as usize).div_ceil(8).max(1)
}

/// Encodes `value` big-endian, left-padded with zeros to exactly `width` bytes.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the value needs more than `width` bytes.
pub fn encode_fixed(value: &BigUint, width: usize) -> Result<Vec<u8>> {
    let raw = value.to_bytes_be();
    // `to_bytes_be` renders zero as a single 0x00 byte.
    let raw: &[u8] = if raw == [0] { &[] } else { &raw };
    if raw.len() > width {
        return Err(Error::Encoding(format!(
            "value needs {} bytes, field width is {width}",
            raw.len()
        )));
    }

    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(raw);
    Ok(out)
}

/// Decodes a big-endian buffer that must be exactly `width` bytes long.
///
/// # Errors
///
/// Returns [`Error::Encoding`] on a length mismatch.
pub fn decode_fixed(bytes: &[u8], width: usize) -> Result<BigUint> {
    if bytes.len() != width {
        return Err(Error::Encoding(format!(
            "expected {width} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(BigUint::from_bytes_be(bytes))
}

/// Encodes a group element (or any value in `[0, p)`) at the width of `p`.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if `value >= p`.
pub fn encode_element(value: &BigUint, p: &BigUint) -> Result<Vec<u8>> {
    if value >= p {
        return Err(Error::Encoding("element must be less than modulus".to_string()));
    }
    encode_fixed(value, byte_width(p))
}

/// Decodes a group element at the width of `p`, rejecting values outside `[0, p)`.
///
/// # Errors
///
/// Returns [`Error::Encoding`] on a length mismatch or an out-of-range value.
pub fn decode_element(bytes: &[u8], p: &BigUint) -> Result<BigUint> {
    let value = decode_fixed(bytes, byte_width(p))?;
    if &value >= p {
        return Err(Error::Encoding(
            "element value must be less than modulus".to_string(),
        ));
    }
    Ok(value)
}

/// Decodes an exponent (reduced mod `p-1`) at the width of `p`.
///
/// # Errors
///
/// Returns [`Error::Encoding`] on a length mismatch or if the value is not below `p-1`.
pub fn decode_exponent(bytes: &[u8], p: &BigUint) -> Result<BigUint> {
    let value = decode_fixed(bytes, byte_width(p))?;
    if &(&value + 1u32) >= p {
        return Err(Error::Encoding(
            "exponent value must be less than p - 1".to_string(),
        ));
    }
    Ok(value)
}

/// Encodes a challenge into the fixed 32-byte field.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the challenge exceeds 256 bits.
pub fn encode_challenge(e: &BigUint) -> Result<[u8; CHALLENGE_BYTES]> {
    let bytes = encode_fixed(e, CHALLENGE_BYTES)?;
    let mut out = [0u8; CHALLENGE_BYTES];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Decodes a 32-byte challenge field.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the buffer is not exactly 32 bytes.
pub fn decode_challenge(bytes: &[u8]) -> Result<BigUint> {
    decode_fixed(bytes, CHALLENGE_BYTES)
}
