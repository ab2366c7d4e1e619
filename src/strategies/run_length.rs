//! Run-length encoding of consecutive values.
//!
//! Wire form: `R` followed by one `scalar(start) SEP scalar(length) TERM`
//! record per run. Inputs made of long consecutive stretches, such as
//! `1..=50`, collapse to a single record.

use crate::alphabet::{SEP, TERM};
use crate::error::CodecError;
use crate::kernels::runs::{self, Run};
use crate::kernels::scalar;
use crate::strategies::{Method, StrategyContext};

pub fn encode(sorted: &[u32], ctx: &StrategyContext<'_>) -> Result<String, CodecError> {
    let runs = runs::detect(sorted);
    log::trace!("run-length: {} values form {} runs", sorted.len(), runs.len());

    let mut out = String::with_capacity(1 + runs.len() * 5);
    out.push(Method::RunLength.marker());
    for run in &runs {
        scalar::encode_into(run.start, ctx.alphabet, &mut out)?;
        out.push(SEP);
        scalar::encode_into(run.length, ctx.alphabet, &mut out)?;
        out.push(TERM);
    }
    Ok(out)
}

pub fn decode(payload: &str, ctx: &StrategyContext<'_>) -> Result<Vec<u32>, CodecError> {
    if payload.is_empty() {
        return Err(CodecError::malformed("run-length payload holds no runs"));
    }
    let body = payload
        .strip_suffix(TERM)
        .ok_or_else(|| CodecError::malformed("run-length payload does not end with a terminator"))?;

    let runs = body
        .split(TERM)
        .map(|record| parse_run(record, ctx))
        .collect::<Result<Vec<Run>, CodecError>>()?;

    let total = runs
        .iter()
        .try_fold(0usize, |total, run| ctx.grow_decoded(total, u64::from(run.length)))?;

    let mut values = Vec::with_capacity(total);
    runs::expand_into(&runs, &mut values);
    values.sort_unstable();
    Ok(values)
}

fn parse_run(record: &str, ctx: &StrategyContext<'_>) -> Result<Run, CodecError> {
    let (start, length) = record
        .split_once(SEP)
        .ok_or_else(|| CodecError::malformed(format!("run record {record:?} has no separator")))?;

    let run = Run {
        start: scalar::decode_one(start, ctx.alphabet)?,
        length: scalar::decode_one(length, ctx.alphabet)?,
    };
    if run.length == 0 {
        return Err(CodecError::malformed(format!("run record {record:?} has zero length")));
    }

    ctx.check_decoded(run.start)?;
    let end = run
        .end()
        .ok_or_else(|| CodecError::malformed(format!("run record {record:?} overflows")))?;
    ctx.check_decoded(end)?;

    Ok(run)
}
