//! The empirical strategy planner.
//!
//! This module picks the encoding for one input. It operates by:
//! 1. Running every candidate strategy (`Method::CANDIDATES`) on the input.
//! 2. Discarding candidates that fail to encode (for example a saturated
//!    count in the bit-packed table) or, when verification is enabled, whose
//!    decoded output differs from the input.
//! 3. Returning the shortest survivor. Ties keep the earlier candidate.
//!
//! Keeping "what does each encoding produce" separate from "which one wins"
//! means no encoder has to be trusted to be lossless for every input.

use serde::Serialize;
use std::time::Instant;

use crate::error::CodecError;
use crate::strategies::{Method, StrategyContext};

/// The result of trying one candidate on one input.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub method: Method,
    pub outcome: CandidateOutcome,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateOutcome {
    /// The candidate produced a verified encoding of `len` characters.
    Encoded { len: usize },
    /// The candidate was disqualified.
    Rejected { reason: String },
}

/// The winning encoding along with the full trial record.
#[derive(Debug)]
pub(crate) struct Plan {
    pub method: Method,
    pub encoded: String,
    pub reports: Vec<CandidateReport>,
}

/// Encodes `sorted` with one candidate and, if asked, proves it decodes back.
fn try_candidate(method: Method, sorted: &[u32], ctx: &StrategyContext<'_>) -> Result<String, CodecError> {
    let encoded = method.encode(sorted, ctx)?;
    if ctx.config.verify_candidates {
        let payload = encoded.get(1..).unwrap_or_default();
        let decoded = method.decode(payload, ctx)?;
        if decoded != sorted {
            return Err(CodecError::InternalError(format!(
                "round-trip mismatch: {} values in, {} values out",
                sorted.len(),
                decoded.len()
            )));
        }
    }
    Ok(encoded)
}

/// Runs every candidate on `sorted` (validated, ascending, non-empty) and
/// keeps the shortest one that survived.
pub(crate) fn plan(sorted: &[u32], ctx: &StrategyContext<'_>) -> Result<Plan, CodecError> {
    let start_overall = Instant::now();
    let mut reports = Vec::with_capacity(Method::CANDIDATES.len());
    let mut best: Option<(Method, String)> = None;

    for method in Method::CANDIDATES {
        let start_candidate = Instant::now();
        match try_candidate(method, sorted, ctx) {
            Ok(encoded) => {
                log::debug!(
                    "  - Candidate: {:<10} | Score (Size): {} | Time: {:.2?}",
                    method,
                    encoded.len(),
                    start_candidate.elapsed(),
                );
                reports.push(CandidateReport {
                    method,
                    outcome: CandidateOutcome::Encoded { len: encoded.len() },
                });
                // Strict `<` keeps the first-seen minimum.
                if best.as_ref().map_or(true, |(_, b)| encoded.len() < b.len()) {
                    best = Some((method, encoded));
                }
            }
            Err(e) => {
                log::debug!("  - Candidate: {:<10} | REJECTED: {}", method, e);
                reports.push(CandidateReport {
                    method,
                    outcome: CandidateOutcome::Rejected { reason: e.to_string() },
                });
            }
        }
    }

    let (method, encoded) = best.ok_or_else(|| {
        CodecError::InternalError(format!("no candidate could encode {} values", sorted.len()))
    })?;

    log::info!(
        "Selected {} for {} values: {} chars in {:.2?}",
        method,
        sorted.len(),
        encoded.len(),
        start_overall.elapsed()
    );
    log_metric!("event" = "plan", "method" = method, "values" = sorted.len(), "len" = encoded.len());

    Ok(Plan { method, encoded, reports })
}
