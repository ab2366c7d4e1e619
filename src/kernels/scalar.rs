//! This module contains the pure, stateless kernels for writing a single
//! non-negative integer in the alphabet's positional numeral system.
//!
//! A scalar is big-endian: most significant symbol first. Zero is the single
//! first symbol of the alphabet, so no scalar is ever empty.

use num_traits::{PrimInt, Unsigned};

use crate::alphabet::Alphabet;
use crate::error::CodecError;

//==================================================================================
// 1. Public API for Single-Value Operations
//==================================================================================

/// Digits needed for `u64::MAX` in the smallest allowed base, 64.
const MAX_DIGITS: usize = 11;

/// Appends the scalar form of `value` to `out`.
pub fn encode_into<T>(value: T, alphabet: &Alphabet, out: &mut String) -> Result<(), CodecError>
where
    T: PrimInt + Unsigned,
{
    let mut current = value
        .to_u64()
        .ok_or_else(|| CodecError::InternalError("scalar value does not fit in u64".to_string()))?;
    let base = alphabet.base() as u64;

    let mut digits = [0u8; MAX_DIGITS];
    let mut len = 0;
    loop {
        digits[len] = (current % base) as u8;
        len += 1;
        current /= base;
        if current == 0 {
            break;
        }
    }

    for &d in digits[..len].iter().rev() {
        let c = alphabet
            .symbol(d as usize)
            .ok_or_else(|| CodecError::InternalError(format!("digit {d} has no symbol")))?;
        out.push(c);
    }
    Ok(())
}

/// Encodes a single value into a new scalar string.
pub fn encode_one<T>(value: T, alphabet: &Alphabet) -> Result<String, CodecError>
where
    T: PrimInt + Unsigned,
{
    let mut out = String::new();
    encode_into(value, alphabet, &mut out)?;
    Ok(out)
}

/// Decodes one scalar field.
///
/// Empty fields, symbols outside the alphabet, leading zero symbols and values
/// that overflow `T` are all `MalformedPayload` errors. Rejecting leading zeros
/// keeps each value to exactly one spelling.
pub fn decode_one<T>(field: &str, alphabet: &Alphabet) -> Result<T, CodecError>
where
    T: PrimInt + Unsigned,
{
    if field.is_empty() {
        return Err(CodecError::malformed("empty scalar field"));
    }
    if field.len() > 1 && field.chars().next().and_then(|c| alphabet.digit(c)) == Some(0) {
        return Err(CodecError::malformed(format!("scalar {field:?} has a leading zero symbol")));
    }

    let base = T::from(alphabet.base())
        .ok_or_else(|| CodecError::malformed("alphabet base does not fit the target type"))?;

    let mut result = T::zero();
    for c in field.chars() {
        let digit = alphabet
            .digit(c)
            .ok_or_else(|| CodecError::malformed(format!("symbol {c:?} is not in the alphabet")))?;
        let digit = T::from(digit)
            .ok_or_else(|| CodecError::malformed("digit does not fit the target type"))?;

        result = result
            .checked_mul(&base)
            .and_then(|r| r.checked_add(&digit))
            .ok_or_else(|| CodecError::malformed(format!("scalar {field:?} overflows")))?;
    }
    Ok(result)
}
