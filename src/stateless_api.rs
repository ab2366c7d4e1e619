//! Free functions over a process-wide default `Codec`.
//!
//! These use `CodecConfig::default()` and the standard alphabet. Callers that
//! need another range or policy build their own `Codec`.

use std::sync::OnceLock;

use crate::codec::{Codec, EncodingStats};
use crate::error::CodecError;

fn default_codec() -> &'static Codec {
    static DEFAULT: OnceLock<Codec> = OnceLock::new();
    DEFAULT.get_or_init(Codec::default)
}

/// Encodes `values` (each in 1..=300) with the shortest verified strategy.
pub fn serialize(values: &[u32]) -> Result<String, CodecError> {
    default_codec().serialize(values)
}

/// Decodes a string produced by `serialize`.
pub fn deserialize(encoded: &str) -> Result<Vec<u32>, CodecError> {
    default_codec().deserialize(encoded)
}

/// Analyzes an encoded string without the caller needing a `Codec`.
/// This function acts as a simple facade over `Codec::analyze`.
pub fn analyze(encoded: &str) -> Result<EncodingStats, CodecError> {
    default_codec().analyze(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::Method;

    #[test]
    fn test_analyze_after_serialize() {
        // 1. Arrange: a consecutive range with one repeated value.
        let input: Vec<u32> = (1..=40).chain([40]).collect();

        // 2. Act: encode, then analyze the result.
        let encoded = serialize(&input).unwrap();
        let stats = analyze(&encoded).unwrap();

        // 3. Assert: the stats describe what was encoded.
        assert_eq!(stats.method, Method::RunLength);
        assert_eq!(stats.encoded_len, encoded.len());
        assert_eq!(stats.payload_len + 1, stats.encoded_len);
        assert_eq!(stats.value_count, 41);
        assert_eq!(stats.distinct_count, 40);
        assert!(stats.symbols_per_value < 1.0);
    }

    #[test]
    fn test_analyze_empty() {
        let stats = analyze("E").unwrap();
        assert_eq!(stats.method, Method::Empty);
        assert_eq!(stats.value_count, 0);
        assert_eq!(stats.symbols_per_value, 0.0);
    }
}
