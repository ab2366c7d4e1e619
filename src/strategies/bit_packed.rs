//! Bit-packed frequency table.
//!
//! The input is reduced to `(value, count)` entries in ascending value order.
//! Each entry becomes a fixed-width record of `value - min` in
//! `bits_per_number` bits followed by `count` in `count_bits` bits (9 + 8 bits
//! for the default config). The concatenated records are carried six bits per
//! symbol.
//!
//! Wire form: `B scalar(entry_count) SEP symbol*`.
//!
//! Fixed-width records pay off for dense inputs with repeated values, and are
//! wasteful for a handful of sparse values, which is why this is one candidate
//! among three rather than the default.

use std::collections::BTreeMap;

use crate::alphabet::SEP;
use crate::error::CodecError;
use crate::kernels::bitpack::{self, Bits, BITS_PER_SYMBOL};
use crate::kernels::scalar;
use crate::strategies::{Method, StrategyContext};

/// Counts occurrences per value, ascending by value.
pub fn frequency_table(sorted: &[u32]) -> BTreeMap<u32, usize> {
    let mut table = BTreeMap::new();
    for &val in sorted {
        *table.entry(val).or_insert(0) += 1;
    }
    table
}

/// Fails with `CountSaturated` when a count does not fit the count field,
/// rather than silently truncating it.
pub fn encode(sorted: &[u32], ctx: &StrategyContext<'_>) -> Result<String, CodecError> {
    let config = ctx.config;
    let table = frequency_table(sorted);
    let value_bits = config.bits_per_number();
    let count_bits = config.count_bits;
    let max_count = config.max_count();

    let mut bits = Bits::with_capacity(table.len() * (value_bits + count_bits) as usize);
    for (&value, &count) in &table {
        if count > max_count as usize {
            return Err(CodecError::CountSaturated { value, count, max: max_count });
        }
        if !config.contains(value) {
            return Err(CodecError::ValueOutOfRange {
                value,
                min: config.min_value,
                max: config.max_value,
            });
        }
        bitpack::push_field(&mut bits, u64::from(value - config.min_value), value_bits)?;
        bitpack::push_field(&mut bits, count as u64, count_bits)?;
    }

    let mut out = String::with_capacity(2 + bitpack::packed_len(bits.len()) + 2);
    out.push(Method::BitPacked.marker());
    scalar::encode_into(table.len(), ctx.alphabet, &mut out)?;
    out.push(SEP);
    bitpack::pack_symbols(&bits, ctx.alphabet, &mut out)?;

    log::trace!("bit-packed: {} entries into {} bits", table.len(), bits.len());
    Ok(out)
}

pub fn decode(payload: &str, ctx: &StrategyContext<'_>) -> Result<Vec<u32>, CodecError> {
    let config = ctx.config;
    let (count_field, symbols) = payload
        .split_once(SEP)
        .ok_or_else(|| CodecError::malformed("bit-packed payload has no entry count separator"))?;
    let entry_count: usize = scalar::decode_one(count_field, ctx.alphabet)?;
    if entry_count == 0 {
        return Err(CodecError::malformed("bit-packed payload holds no entries"));
    }
    let bits = bitpack::unpack_symbols(symbols, ctx.alphabet)?;

    let value_bits = config.bits_per_number();
    let count_bits = config.count_bits;
    let record_bits = (value_bits + count_bits) as usize;

    let needed = entry_count
        .checked_mul(record_bits)
        .filter(|&n| n <= bits.len())
        .ok_or_else(|| {
            CodecError::malformed(format!(
                "{entry_count} entries need {record_bits} bits each, only {} bits present",
                bits.len()
            ))
        })?;
    let padding = &bits[needed..];
    if padding.len() >= BITS_PER_SYMBOL || padding.any() {
        return Err(CodecError::malformed(format!(
            "{} trailing bits after the last entry are not zero padding",
            padding.len()
        )));
    }

    let mut values = Vec::new();
    let mut total = 0usize;
    let mut previous: Option<u32> = None;
    for i in 0..entry_count {
        let at = i * record_bits;
        let (offset, count) = bitpack::read_field(&bits, at, value_bits)
            .zip(bitpack::read_field(&bits, at + value_bits as usize, count_bits))
            .ok_or_else(|| CodecError::InternalError("record bounds were checked above".to_string()))?;

        let value = u64::from(config.min_value)
            .checked_add(offset)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| CodecError::malformed(format!("entry {i} value overflows")))?;
        ctx.check_decoded(value)?;
        if count == 0 {
            return Err(CodecError::malformed(format!("entry {i} has a zero count")));
        }
        if previous.is_some_and(|p| p >= value) {
            return Err(CodecError::malformed(format!("entry {i} is not in ascending value order")));
        }
        previous = Some(value);

        total = ctx.grow_decoded(total, count)?;
        values.extend(std::iter::repeat(value).take(count as usize));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::config::CodecConfig;

    fn ctx(config: &CodecConfig) -> StrategyContext<'_> {
        StrategyContext::new(config, Alphabet::standard())
    }

    #[test]
    fn test_frequency_table_is_ascending() {
        let table = frequency_table(&[2, 2, 5, 9, 9, 9]);
        let entries: Vec<(u32, usize)> = table.into_iter().collect();
        assert_eq!(entries, vec![(2, 2), (5, 1), (9, 3)]);
    }

    #[test]
    fn test_each_value_three_times_roundtrips() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let input: Vec<u32> = (1..=100).flat_map(|v| [v, v, v]).collect();

        let encoded = encode(&input, &ctx).unwrap();
        assert!(encoded.starts_with('B'));
        // 100 entries * 17 bits = 1700 bits = 284 symbols (283.33 rounded up).
        let symbols = encoded.split_once(SEP).unwrap().1;
        assert_eq!(symbols.len(), 284);
        assert_eq!(decode(&encoded[1..], &ctx).unwrap(), input);
    }

    #[test]
    fn test_boundary_values_roundtrip() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let input = vec![1, 1, 300];
        let encoded = encode(&input, &ctx).unwrap();
        assert_eq!(decode(&encoded[1..], &ctx).unwrap(), input);
    }

    #[test]
    fn test_saturated_count_disqualifies() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let input = vec![7u32; 300];
        let err = encode(&input, &ctx).unwrap_err();
        if let CodecError::CountSaturated { value, count, max } = err {
            assert_eq!(value, 7);
            assert_eq!(count, 300);
            assert_eq!(max, 255);
        } else {
            panic!("Expected CountSaturated");
        }
    }

    #[test]
    fn test_wider_count_field_accepts_large_counts() {
        let config = CodecConfig { count_bits: 16, ..CodecConfig::default() };
        let ctx = ctx(&config);
        let input = vec![7u32; 300];
        let encoded = encode(&input, &ctx).unwrap();
        assert_eq!(decode(&encoded[1..], &ctx).unwrap(), input);
    }

    #[test]
    fn test_decode_truncated_payload_error() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let input: Vec<u32> = (10..20).collect();
        let mut encoded = encode(&input, &ctx).unwrap();
        encoded.pop();

        let result = decode(&encoded[1..], &ctx);
        assert!(matches!(result, Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn test_decode_rejects_extra_symbols() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let mut encoded = encode(&[4, 5], &ctx).unwrap();
        encoded.push(ctx.alphabet.symbol(0).unwrap());

        let result = decode(&encoded[1..], &ctx);
        assert!(matches!(result, Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_symbol_and_missing_separator() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        assert!(matches!(decode("A,~~~", &ctx), Err(CodecError::MalformedPayload(_))));
        assert!(matches!(decode("AAAA", &ctx), Err(CodecError::MalformedPayload(_))));
    }

    /// Builds a payload (without the marker) from hand-written bit fields.
    fn hand_built(ctx: &StrategyContext<'_>, entry_count: u32, fields: &[(u64, u8)]) -> String {
        let mut bits = Bits::new();
        for &(value, width) in fields {
            bitpack::push_field(&mut bits, value, width).unwrap();
        }
        let mut payload = String::new();
        scalar::encode_into(entry_count, ctx.alphabet, &mut payload).unwrap();
        payload.push(SEP);
        bitpack::pack_symbols(&bits, ctx.alphabet, &mut payload).unwrap();
        payload
    }

    #[test]
    fn test_hand_built_payload_decodes() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let payload = hand_built(&ctx, 2, &[(3, 9), (2, 8), (9, 9), (1, 8)]);
        assert_eq!(decode(&payload, &ctx).unwrap(), vec![4, 4, 10]);
    }

    #[test]
    fn test_decode_rejects_zero_count_entry() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let payload = hand_built(&ctx, 1, &[(4, 9), (0, 8)]);
        assert!(matches!(decode(&payload, &ctx), Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn test_decode_rejects_nonzero_padding() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        // 17 record bits plus one set padding bit fill exactly three symbols.
        let payload = hand_built(&ctx, 1, &[(4, 9), (1, 8), (1, 1)]);
        assert_eq!(payload.split_once(SEP).unwrap().1.len(), 3);

        let result = decode(&payload, &ctx);
        if let Err(CodecError::MalformedPayload(msg)) = result {
            assert!(msg.contains("padding"));
        } else {
            panic!("Expected MalformedPayload for set padding bits");
        }
    }

    #[test]
    fn test_decode_rejects_unordered_entries() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let payload = hand_built(&ctx, 2, &[(9, 9), (1, 8), (4, 9), (1, 8)]);

        let result = decode(&payload, &ctx);
        if let Err(CodecError::MalformedPayload(msg)) = result {
            assert!(msg.contains("ascending"));
        } else {
            panic!("Expected MalformedPayload for unordered entries");
        }
    }

    #[test]
    fn test_decode_rejects_repeated_entry_value() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let payload = hand_built(&ctx, 2, &[(4, 9), (1, 8), (4, 9), (1, 8)]);
        assert!(matches!(decode(&payload, &ctx), Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn test_decode_rejects_value_above_max() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        // Offset 300 fits the 9-bit field but decodes to 301.
        let payload = hand_built(&ctx, 1, &[(300, 9), (1, 8)]);
        assert!(matches!(decode(&payload, &ctx), Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn test_decode_rejects_empty_entry_list() {
        let config = CodecConfig::default();
        let ctx = ctx(&config);
        let payload = hand_built(&ctx, 0, &[]);
        assert_eq!(payload, "+,");
        assert!(matches!(decode(&payload, &ctx), Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn test_decode_rejects_count_past_length_limit() {
        let config = CodecConfig { count_bits: 32, ..CodecConfig::default() };
        let ctx = ctx(&config);
        // A single entry claiming 2^24 copies of the minimum value.
        let payload = hand_built(&ctx, 1, &[(0, 9), (1 << 24, 32)]);

        let result = decode(&payload, &ctx);
        if let Err(CodecError::MalformedPayload(msg)) = result {
            assert!(msg.contains("limit"));
        } else {
            panic!("Expected MalformedPayload for an oversized count");
        }
    }
}
