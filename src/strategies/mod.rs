//! The three competing encodings and the marker that names each of them.
//!
//! Every strategy exposes the same pair of functions:
//!
//! * `encode(sorted, ctx)` takes the validated, ascending input and returns the
//!   complete tagged string, marker included.
//! * `decode(payload, ctx)` takes everything after the marker and returns the
//!   multiset in ascending order, or `MalformedPayload` on any defect.
//!
//! Only `E` stands for the empty multiset. A `D`, `R` or `B` payload that
//! describes zero values is malformed, and no decode may produce more than
//! `max_decoded_len` values.
//!
//! `Method` is the single source of truth for the marker characters and
//! dispatches to the matching strategy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::alphabet::Alphabet;
use crate::config::CodecConfig;
use crate::error::CodecError;

pub mod bit_packed;
pub mod direct;
pub mod run_length;

/// Everything a strategy needs besides the data itself.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    pub config: &'a CodecConfig,
    pub alphabet: &'a Alphabet,
}

impl<'a> StrategyContext<'a> {
    pub fn new(config: &'a CodecConfig, alphabet: &'a Alphabet) -> Self {
        Self { config, alphabet }
    }

    /// Fails with `MalformedPayload` unless `value` is in the configured range.
    pub(crate) fn check_decoded(&self, value: u32) -> Result<u32, CodecError> {
        if self.config.contains(value) {
            Ok(value)
        } else {
            Err(CodecError::malformed(format!(
                "decoded value {value} is outside [{}, {}]",
                self.config.min_value, self.config.max_value
            )))
        }
    }

    /// Adds `more` values to a running decoded total of `total`, failing with
    /// `MalformedPayload` once the total would pass `max_decoded_len`.
    /// Call before reserving or extending the output.
    pub(crate) fn grow_decoded(&self, total: usize, more: u64) -> Result<usize, CodecError> {
        let limit = self.config.max_decoded_len;
        usize::try_from(more)
            .ok()
            .and_then(|more| total.checked_add(more))
            .filter(|&next| next <= limit)
            .ok_or_else(|| {
                CodecError::malformed(format!(
                    "payload expands past the decoded length limit of {limit} values"
                ))
            })
    }
}

/// The encoding method recorded in the first character of every encoded string.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Empty,
    RunLength,
    BitPacked,
    Direct,
}

impl Method {
    /// Candidate order used by the planner. Earlier methods win ties.
    pub const CANDIDATES: [Method; 3] = [Method::Direct, Method::RunLength, Method::BitPacked];

    pub fn marker(self) -> char {
        match self {
            Method::Empty => 'E',
            Method::RunLength => 'R',
            Method::BitPacked => 'B',
            Method::Direct => 'D',
        }
    }

    pub fn from_marker(marker: char) -> Result<Self, CodecError> {
        match marker {
            'E' => Ok(Method::Empty),
            'R' => Ok(Method::RunLength),
            'B' => Ok(Method::BitPacked),
            'D' => Ok(Method::Direct),
            other => Err(CodecError::InvalidEncoding(other)),
        }
    }

    /// Encodes `sorted` with this method. `Empty` only accepts an empty input.
    pub fn encode(self, sorted: &[u32], ctx: &StrategyContext<'_>) -> Result<String, CodecError> {
        match self {
            Method::Empty if sorted.is_empty() => Ok(Method::Empty.marker().to_string()),
            Method::Empty => Err(CodecError::InternalError(
                "the empty method cannot encode a non-empty input".to_string(),
            )),
            Method::RunLength => run_length::encode(sorted, ctx),
            Method::BitPacked => bit_packed::encode(sorted, ctx),
            Method::Direct => direct::encode(sorted, ctx),
        }
    }

    /// Decodes the payload that followed this method's marker.
    pub fn decode(self, payload: &str, ctx: &StrategyContext<'_>) -> Result<Vec<u32>, CodecError> {
        match self {
            Method::Empty if payload.is_empty() => Ok(Vec::new()),
            Method::Empty => Err(CodecError::malformed("the empty marker takes no payload")),
            Method::RunLength => run_length::decode(payload, ctx),
            Method::BitPacked => bit_packed::decode(payload, ctx),
            Method::Direct => direct::decode(payload, ctx),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Empty => "Empty",
            Method::RunLength => "RunLength",
            Method::BitPacked => "BitPacked",
            Method::Direct => "Direct",
        };
        f.pad(name)
    }
}
