//! The single source of truth for codec configuration.
//!
//! `CodecConfig` is created once at the application boundary (for example from
//! a JSON document) and then shared read-only through an `Arc<CodecConfig>` by
//! every `Codec` handle.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// What `serialize` does with input values outside `[min_value, max_value]`.
///
/// The policy is applied once, before any strategy runs, so all candidates see
/// the same input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// **Default:** fail with `CodecError::ValueOutOfRange` on the first offending value.
    #[default]
    Reject,

    /// Silently remove offending values and encode the rest.
    Drop,
}

/// The unified configuration for a `Codec`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Smallest accepted value (inclusive).
    #[serde(default = "default_min_value")]
    pub min_value: u32,

    /// Largest accepted value (inclusive).
    #[serde(default = "default_max_value")]
    pub max_value: u32,

    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,

    /// Width of the per-value count field in the bit-packed encoding.
    /// Counts above `2^count_bits - 1` disqualify that encoding for the input.
    #[serde(default = "default_count_bits")]
    pub count_bits: u8,

    /// If true, every candidate is decoded and compared with the input before
    /// it may win. Turning this off is only useful for diagnostics.
    #[serde(default = "default_true")]
    pub verify_candidates: bool,

    /// Upper bound on the number of values a single decode may produce, and
    /// on the number of values `serialize` accepts. Run-length and bit-packed
    /// records expand, so this keeps a short string from demanding a huge
    /// allocation.
    #[serde(default = "default_max_decoded_len")]
    pub max_decoded_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            min_value: default_min_value(),
            max_value: default_max_value(),
            out_of_range: OutOfRangePolicy::default(),
            count_bits: default_count_bits(),
            verify_candidates: true,
            max_decoded_len: default_max_decoded_len(),
        }
    }
}

impl CodecConfig {
    /// Parses a JSON document into a validated config. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if self.min_value > self.max_value {
            return Err(CodecError::InvalidConfig(format!(
                "min_value {} is greater than max_value {}",
                self.min_value, self.max_value
            )));
        }
        if self.count_bits == 0 || self.count_bits > 32 {
            return Err(CodecError::InvalidConfig(format!(
                "count_bits must be within 1..=32, got {}",
                self.count_bits
            )));
        }
        if self.max_decoded_len == 0 {
            return Err(CodecError::InvalidConfig("max_decoded_len must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    /// Bits needed to store `value - min_value` for any accepted value.
    /// 9 for the default range 1..=300.
    pub fn bits_per_number(&self) -> u8 {
        bit_width(u64::from(self.max_value - self.min_value)).max(1)
    }

    /// Largest count the bit-packed count field can hold.
    pub fn max_count(&self) -> u32 {
        if self.count_bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.count_bits) - 1
        }
    }
}

pub(crate) fn bit_width(n: u64) -> u8 {
    if n == 0 {
        0
    } else {
        64 - n.leading_zeros() as u8
    }
}

fn default_min_value() -> u32 {
    1
}

fn default_max_value() -> u32 {
    300
}

fn default_count_bits() -> u8 {
    8
}

fn default_max_decoded_len() -> usize {
    1 << 20
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_domain() {
        let config = CodecConfig::default();
        assert_eq!(config.min_value, 1);
        assert_eq!(config.max_value, 300);
        assert_eq!(config.bits_per_number(), 9);
        assert_eq!(config.max_count(), 255);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Reject);
        assert!(config.verify_candidates);
        assert_eq!(config.max_decoded_len, 1 << 20);
    }

    #[test]
    fn test_from_json_rejects_zero_decoded_len() {
        let result = CodecConfig::from_json(r#"{ "max_decoded_len": 0 }"#);
        assert!(matches!(result, Err(CodecError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = CodecConfig::from_json(r#"{ "max_value": 1000, "out_of_range": "drop" }"#).unwrap();
        assert_eq!(config.min_value, 1);
        assert_eq!(config.max_value, 1000);
        assert_eq!(config.bits_per_number(), 10);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Drop);
        assert_eq!(config.count_bits, 8);
    }

    #[test]
    fn test_from_json_rejects_inverted_range() {
        let result = CodecConfig::from_json(r#"{ "min_value": 10, "max_value": 5 }"#);
        assert!(matches!(result, Err(CodecError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_rejects_bad_count_bits() {
        let result = CodecConfig::from_json(r#"{ "count_bits": 0 }"#);
        assert!(matches!(result, Err(CodecError::InvalidConfig(_))));
        let result = CodecConfig::from_json(r#"{ "count_bits": 33 }"#);
        assert!(matches!(result, Err(CodecError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let result = CodecConfig::from_json("{ not json");
        assert!(matches!(result, Err(CodecError::ConfigParse(_))));
    }

    #[test]
    fn test_single_value_range_still_uses_one_bit() {
        let config = CodecConfig {
            min_value: 7,
            max_value: 7,
            ..CodecConfig::default()
        };
        assert_eq!(config.bits_per_number(), 1);
        assert!(config.contains(7));
        assert!(!config.contains(8));
    }
}
