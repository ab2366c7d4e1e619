//! The stateful facade over the planner and the strategies.
//!
//! A `Codec` pairs a shared, read-only `CodecConfig` with an alphabet. It is
//! cheap to clone, `Send + Sync`, and every call is independent of every
//! other call.

use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::config::{CodecConfig, OutOfRangePolicy};
use crate::error::CodecError;
use crate::planner::{self, CandidateReport};
use crate::strategies::{Method, StrategyContext};

/// Summary of an encoded string, returned by `Codec::analyze`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EncodingStats {
    pub method: Method,
    /// Characters in the whole encoded string, marker included.
    pub encoded_len: usize,
    /// Characters after the marker.
    pub payload_len: usize,
    pub value_count: usize,
    pub distinct_count: usize,
    /// `encoded_len / value_count`, or 0 for an empty multiset.
    pub symbols_per_value: f64,
}

#[derive(Debug, Clone)]
pub struct Codec {
    config: Arc<CodecConfig>,
    alphabet: Cow<'static, Alphabet>,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            config: Arc::new(CodecConfig::default()),
            alphabet: Cow::Borrowed(Alphabet::standard()),
        }
    }
}

impl Codec {
    /// Creates a codec over the standard alphabet after validating `config`.
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        Self::from_shared(Arc::new(config))
    }

    /// Creates a codec that shares an existing config.
    pub fn from_shared(config: Arc<CodecConfig>) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self {
            config,
            alphabet: Cow::Borrowed(Alphabet::standard()),
        })
    }

    /// Creates a codec over a custom alphabet.
    pub fn with_alphabet(config: CodecConfig, alphabet: Alphabet) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            alphabet: Cow::Owned(alphabet),
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn context(&self) -> StrategyContext<'_> {
        StrategyContext::new(&self.config, &self.alphabet)
    }

    /// Applies the out-of-range policy to an owned, sorted copy of `values`.
    /// The caller's slice is never reordered.
    fn prepare(&self, values: &[u32]) -> Result<Vec<u32>, CodecError> {
        let config = &self.config;
        let mut owned = match config.out_of_range {
            OutOfRangePolicy::Reject => {
                if let Some(&value) = values.iter().find(|&&v| !config.contains(v)) {
                    return Err(CodecError::ValueOutOfRange {
                        value,
                        min: config.min_value,
                        max: config.max_value,
                    });
                }
                values.to_vec()
            }
            OutOfRangePolicy::Drop => {
                let kept: Vec<u32> = values.iter().copied().filter(|&v| config.contains(v)).collect();
                if kept.len() != values.len() {
                    log::debug!("Dropped {} out-of-range values", values.len() - kept.len());
                }
                kept
            }
        };
        if owned.len() > config.max_decoded_len {
            return Err(CodecError::InputTooLarge {
                len: owned.len(),
                max: config.max_decoded_len,
            });
        }
        owned.sort_unstable();
        Ok(owned)
    }

    /// Encodes `values` as the shortest verified tagged string.
    ///
    /// An empty input (or one emptied by the `Drop` policy) encodes to `"E"`.
    pub fn serialize(&self, values: &[u32]) -> Result<String, CodecError> {
        let sorted = self.prepare(values)?;
        if sorted.is_empty() {
            return Ok(Method::Empty.marker().to_string());
        }
        Ok(planner::plan(&sorted, &self.context())?.encoded)
    }

    /// Decodes a tagged string back into the multiset, in ascending order.
    pub fn deserialize(&self, encoded: &str) -> Result<Vec<u32>, CodecError> {
        let Some(marker) = encoded.chars().next() else {
            return Ok(Vec::new());
        };
        let method = Method::from_marker(marker)?;
        method.decode(&encoded[marker.len_utf8()..], &self.context())
    }

    /// Runs the planner on `values` and returns the trial report for every
    /// candidate. An empty input has no candidates.
    pub fn evaluate(&self, values: &[u32]) -> Result<Vec<CandidateReport>, CodecError> {
        let sorted = self.prepare(values)?;
        if sorted.is_empty() {
            return Ok(Vec::new());
        }
        Ok(planner::plan(&sorted, &self.context())?.reports)
    }

    /// Decodes `encoded` and describes it.
    pub fn analyze(&self, encoded: &str) -> Result<EncodingStats, CodecError> {
        let method = match encoded.chars().next() {
            Some(marker) => Method::from_marker(marker)?,
            None => Method::Empty,
        };
        let values = self.deserialize(encoded)?;

        let encoded_len = encoded.chars().count();
        let mut distinct_count = 0;
        let mut previous = None;
        for &v in &values {
            if previous != Some(v) {
                distinct_count += 1;
                previous = Some(v);
            }
        }

        Ok(EncodingStats {
            method,
            encoded_len,
            payload_len: encoded_len.saturating_sub(1),
            value_count: values.len(),
            distinct_count,
            symbols_per_value: if values.is_empty() {
                0.0
            } else {
                encoded_len as f64 / values.len() as f64
            },
        })
    }
}
