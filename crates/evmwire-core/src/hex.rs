//! Hex and numeric conversions for the JSON-RPC wire encoding.
//!
//! The wire has two distinct numeral domains and this module keeps them as
//! separate, explicit functions rather than one generic converter:
//!
//! - **QUANTITY**: `0x`-prefixed hex with no leading zero nibbles (`0x0` for
//!   zero), used for nonces, gas values, block numbers, `v`, ...
//! - **DATA**: `0x`-prefixed hex preserving the exact byte length, used for
//!   hashes, addresses and signature components.
//!
//! Amounts that can exceed 2^64 (wei values, fees) travel as opaque strings
//! in the canonical model and cross the boundary through
//! [`decimal_string_to_hex`], which uses arbitrary-precision arithmetic so
//! no value is ever squeezed through a fixed-width integer.

use std::fmt::Write;
use std::num::IntErrorKind;

use num_bigint::BigUint;

use crate::error::HexError;

/// Strips a leading `0x`/`0X` prefix, returning `None` when there is none.
fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

/// Decodes a hex string (`0x` prefix optional) into bytes.
///
/// An empty payload (`""` or `"0x"`) decodes to an empty vector.
///
/// # Errors
/// Returns [`HexError::MalformedHex`] on non-hex characters or odd length.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, HexError> {
    let payload = strip_hex_prefix(s).unwrap_or(s);
    hex::decode(payload).map_err(|_| HexError::MalformedHex(s.to_string()))
}

/// Encodes bytes as lowercase `0x`-prefixed DATA hex.
///
/// The output length always matches the input's byte length; no padding is
/// added and no leading zero bytes are trimmed.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for byte in bytes {
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}

/// Encodes bytes as DATA hex of exactly `width` bytes, left-padding with
/// zero bytes when the input is shorter.
///
/// Signature components (`r`, `s`) are fixed 32-byte DATA on the wire even
/// when upstream producers strip their leading zero bytes; this restores
/// them. Inputs longer than `width` are emitted unpadded.
#[must_use]
pub fn bytes_to_hex_fixed(bytes: &[u8], width: usize) -> String {
    if bytes.len() >= width {
        return bytes_to_hex(bytes);
    }
    let mut out = String::with_capacity(2 + width * 2);
    out.push_str("0x");
    for _ in 0..(width - bytes.len()) {
        out.push_str("00");
    }
    for byte in bytes {
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}

/// Encodes the big-endian integer value of `bytes` as minimal QUANTITY hex.
///
/// Leading zero bytes are dropped and the leading nibble is minimal; empty
/// or all-zero input encodes as `0x0`.
#[must_use]
pub fn bytes_to_quantity_hex(bytes: &[u8]) -> String {
    let significant = match bytes.iter().position(|b| *b != 0) {
        Some(idx) => &bytes[idx..],
        None => return "0x0".to_string(),
    };
    let mut out = String::with_capacity(2 + significant.len() * 2);
    out.push_str("0x");
    let _ = write!(&mut out, "{:x}", significant[0]);
    for byte in &significant[1..] {
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}

/// Formats a `u64` as minimal QUANTITY hex; zero is `0x0`.
#[must_use]
pub fn u64_to_quantity_hex(value: u64) -> String {
    format!("0x{value:x}")
}

/// Formats a `u32` as minimal QUANTITY hex; zero is `0x0`.
#[must_use]
pub fn u32_to_quantity_hex(value: u32) -> String {
    format!("0x{value:x}")
}

fn int_error(s: &str, kind: &IntErrorKind, width: u32) -> HexError {
    match kind {
        IntErrorKind::PosOverflow => {
            HexError::Overflow { value: s.to_string(), width }
        }
        _ => HexError::InvalidNumeral(s.to_string()),
    }
}

/// Parses a numeral that may be either `0x`-prefixed hex or base-10 decimal.
///
/// Wire producers disagree on which form numeric fields take; both are
/// accepted everywhere a QUANTITY is expected.
///
/// # Errors
/// [`HexError::Overflow`] when the value exceeds `u64`,
/// [`HexError::InvalidNumeral`] when neither form parses.
pub fn numberish_to_u64(s: &str) -> Result<u64, HexError> {
    match strip_hex_prefix(s) {
        Some(payload) => u64::from_str_radix(payload, 16)
            .map_err(|e| int_error(s, e.kind(), 64)),
        None => s.parse::<u64>().map_err(|e| int_error(s, e.kind(), 64)),
    }
}

/// Parses a hex-or-decimal numeral into a `u32`.
///
/// # Errors
/// [`HexError::Overflow`] when the value exceeds `u32`,
/// [`HexError::InvalidNumeral`] when neither form parses.
pub fn numberish_to_u32(s: &str) -> Result<u32, HexError> {
    match strip_hex_prefix(s) {
        Some(payload) => u32::from_str_radix(payload, 16)
            .map_err(|e| int_error(s, e.kind(), 32)),
        None => s.parse::<u32>().map_err(|e| int_error(s, e.kind(), 32)),
    }
}

/// Converts an amount string into QUANTITY hex without precision loss.
///
/// `0x`-prefixed input is already QUANTITY hex and passes through unchanged
/// (after validating its digits): canonical amount fields store whatever
/// radix the wire delivered, and re-normalizing them would break
/// byte-identical round trips. Base-10 input goes through [`BigUint`], never
/// a fixed-width integer, because transaction values and fees exceed 2^64 in
/// normal operation.
///
/// # Errors
/// [`HexError::MalformedHex`] for a bad hex payload,
/// [`HexError::InvalidNumeral`] for a bad decimal numeral.
pub fn decimal_string_to_hex(s: &str) -> Result<String, HexError> {
    if let Some(payload) = strip_hex_prefix(s) {
        if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexError::MalformedHex(s.to_string()));
        }
        return Ok(s.to_string());
    }
    let value = s
        .parse::<BigUint>()
        .map_err(|_| HexError::InvalidNumeral(s.to_string()))?;
    Ok(format!("0x{value:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_and_without_prefix() {
        assert_eq!(hex_to_bytes("0x123456").unwrap(), vec![0x12, 0x34, 0x56]);
        assert_eq!(hex_to_bytes("123456").unwrap(), vec![0x12, 0x34, 0x56]);
        assert_eq!(hex_to_bytes("0X0aFF").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(hex_to_bytes("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(hex_to_bytes("0x12g4"), Err(HexError::MalformedHex(_))));
        // Odd length after prefix removal.
        assert!(matches!(hex_to_bytes("0x123"), Err(HexError::MalformedHex(_))));
    }

    #[test]
    fn encode_decode_is_idempotent() {
        let bytes = vec![0x00, 0xde, 0xad, 0xbe, 0xef];
        assert_eq!(hex_to_bytes(&bytes_to_hex(&bytes)).unwrap(), bytes);
        // Case and prefix normalize, value is preserved.
        assert_eq!(bytes_to_hex(&hex_to_bytes("0XDEADBEEF").unwrap()), "0xdeadbeef");
    }

    #[test]
    fn fixed_width_restores_leading_zeros() {
        let r = hex_to_bytes("0x0d7536a2").unwrap();
        assert_eq!(bytes_to_hex_fixed(&r, 32).len(), 2 + 64);
        assert_eq!(
            bytes_to_hex_fixed(&[0x01], 32),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(bytes_to_hex_fixed(&[], 2), "0x0000");
        // Longer-than-width input is emitted as-is.
        assert_eq!(bytes_to_hex_fixed(&[1, 2, 3], 2), "0x010203");
    }

    #[test]
    fn quantity_hex_is_minimal() {
        assert_eq!(bytes_to_quantity_hex(&[]), "0x0");
        assert_eq!(bytes_to_quantity_hex(&[0x00, 0x00]), "0x0");
        assert_eq!(bytes_to_quantity_hex(&[0x00, 0x1b]), "0x1b");
        assert_eq!(bytes_to_quantity_hex(&[0x0a, 0x95]), "0xa95");
        assert_eq!(u64_to_quantity_hex(0), "0x0");
        assert_eq!(u64_to_quantity_hex(0x5208), "0x5208");
        assert_eq!(u32_to_quantity_hex(126), "0x7e");
    }

    #[test]
    fn numberish_accepts_both_radixes() {
        assert_eq!(numberish_to_u64("0x5208").unwrap(), 21000);
        assert_eq!(numberish_to_u64("0X10").unwrap(), 16);
        assert_eq!(numberish_to_u64("21000").unwrap(), 21000);
        assert_eq!(numberish_to_u32("0x7e").unwrap(), 126);
        assert_eq!(numberish_to_u32("126").unwrap(), 126);
    }

    #[test]
    fn numberish_distinguishes_overflow_from_garbage() {
        assert!(matches!(
            numberish_to_u32("0x1ffffffff"),
            Err(HexError::Overflow { width: 32, .. })
        ));
        assert!(matches!(
            numberish_to_u64("0x10000000000000000"),
            Err(HexError::Overflow { width: 64, .. })
        ));
        assert!(matches!(numberish_to_u64("not-a-number"), Err(HexError::InvalidNumeral(_))));
        assert!(matches!(numberish_to_u64(""), Err(HexError::InvalidNumeral(_))));
    }

    #[test]
    fn decimal_string_to_hex_passes_hex_through() {
        assert_eq!(decimal_string_to_hex("0x1234").unwrap(), "0x1234");
        assert_eq!(decimal_string_to_hex("0x3b9aca00").unwrap(), "0x3b9aca00");
        assert!(matches!(
            decimal_string_to_hex("0xnope"),
            Err(HexError::MalformedHex(_))
        ));
        assert!(matches!(decimal_string_to_hex("0x"), Err(HexError::MalformedHex(_))));
    }

    #[test]
    fn decimal_string_to_hex_handles_values_beyond_u64() {
        assert_eq!(decimal_string_to_hex("0").unwrap(), "0x0");
        assert_eq!(decimal_string_to_hex("1000000000").unwrap(), "0x3b9aca00");
        // 2^128, far past u64.
        assert_eq!(
            decimal_string_to_hex("340282366920938463463374607431768211456").unwrap(),
            "0x100000000000000000000000000000000"
        );
        assert!(matches!(decimal_string_to_hex("12.5"), Err(HexError::InvalidNumeral(_))));
    }
}
