//! This module contains the kernels for fixed-width bit fields and for carrying
//! a bit stream in printable symbols, six bits per symbol.
//!
//! Fields are written most-significant bit first and the stream is cut into
//! 6-bit groups in order; the final group is padded with zero bits. Group value
//! `g` is carried by alphabet symbol `g`, so only the first 64 symbols of an
//! alphabet are ever used here.

use bitvec::prelude::*;

use crate::alphabet::{Alphabet, PACKED_SYMBOLS};
use crate::error::CodecError;

/// Bits carried by one symbol.
pub const BITS_PER_SYMBOL: usize = 6;

pub type Bits = BitVec<u8, Msb0>;

//==================================================================================
// 1. Field Writing / Reading
//==================================================================================

/// Appends the low `width` bits of `value` to `bits`, most significant first.
pub fn push_field(bits: &mut Bits, value: u64, width: u8) -> Result<(), CodecError> {
    if width == 0 || width > 64 {
        return Err(CodecError::FieldOverflow(value, width));
    }
    let max_val = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
    if value > max_val {
        return Err(CodecError::FieldOverflow(value, width));
    }
    bits.extend_from_bitslice(&value.view_bits::<Msb0>()[64 - width as usize..]);
    Ok(())
}

/// Reads a `width`-bit field starting at `offset`, or `None` if the field runs
/// past the end of `bits`.
pub fn read_field(bits: &BitSlice<u8, Msb0>, offset: usize, width: u8) -> Option<u64> {
    let end = offset.checked_add(width as usize)?;
    let field = bits.get(offset..end)?;

    let mut container = 0u64;
    for bit in field.iter().by_vals() {
        container = (container << 1) | u64::from(bit);
    }
    Some(container)
}

//==================================================================================
// 2. Symbol Packing
//==================================================================================

/// Number of symbols needed to carry `bit_len` bits.
pub fn packed_len(bit_len: usize) -> usize {
    bit_len.div_ceil(BITS_PER_SYMBOL)
}

/// Appends `bits` to `out` as 6-bit symbols, zero-padding the last group.
pub fn pack_symbols(bits: &BitSlice<u8, Msb0>, alphabet: &Alphabet, out: &mut String) -> Result<(), CodecError> {
    out.reserve(packed_len(bits.len()));
    for chunk in bits.chunks(BITS_PER_SYMBOL) {
        let mut group = 0usize;
        for bit in chunk.iter().by_vals() {
            group = (group << 1) | usize::from(bit);
        }
        // Left-align a short final chunk, i.e. pad with trailing zeros.
        group <<= BITS_PER_SYMBOL - chunk.len();

        let symbol = alphabet
            .symbol(group)
            .ok_or_else(|| CodecError::InternalError(format!("6-bit group {group} has no symbol")))?;
        out.push(symbol);
    }
    log::trace!("packed {} bits into {} symbols", bits.len(), packed_len(bits.len()));
    Ok(())
}

/// Turns packed symbols back into a bit stream of `6 * symbols.len()` bits.
///
/// A character outside the alphabet, or a symbol whose index does not fit in
/// six bits, is a `MalformedPayload` error.
pub fn unpack_symbols(symbols: &str, alphabet: &Alphabet) -> Result<Bits, CodecError> {
    let mut bits = Bits::with_capacity(symbols.len() * BITS_PER_SYMBOL);
    for c in symbols.chars() {
        let group = alphabet
            .digit(c)
            .filter(|&d| d < PACKED_SYMBOLS)
            .ok_or_else(|| CodecError::malformed(format!("symbol {c:?} cannot carry a 6-bit group")))?;
        bits.extend_from_bitslice(&(group as u8).view_bits::<Msb0>()[8 - BITS_PER_SYMBOL..]);
    }
    Ok(bits)
}
