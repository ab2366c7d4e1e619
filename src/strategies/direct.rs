//! Direct enumeration: one scalar per element, duplicates included.
//!
//! Wire form: `D` followed by `scalar SEP` for every value in ascending order.
//! This has the best worst case of the three encodings and is always exact,
//! so the planner can always fall back to it.

use crate::alphabet::SEP;
use crate::error::CodecError;
use crate::kernels::scalar;
use crate::strategies::{Method, StrategyContext};

pub fn encode(sorted: &[u32], ctx: &StrategyContext<'_>) -> Result<String, CodecError> {
    // Default range values take at most two symbols plus the separator.
    let mut out = String::with_capacity(1 + sorted.len() * 3);
    out.push(Method::Direct.marker());
    for &val in sorted {
        scalar::encode_into(val, ctx.alphabet, &mut out)?;
        out.push(SEP);
    }
    Ok(out)
}

pub fn decode(payload: &str, ctx: &StrategyContext<'_>) -> Result<Vec<u32>, CodecError> {
    if payload.is_empty() {
        return Err(CodecError::malformed("direct payload holds no values"));
    }
    let body = payload
        .strip_suffix(SEP)
        .ok_or_else(|| CodecError::malformed("direct payload does not end with a separator"))?;
    let fields = body.split(SEP).count();
    ctx.grow_decoded(0, fields as u64)?;

    let mut values = body
        .split(SEP)
        .map(|field| scalar::decode_one::<u32>(field, ctx.alphabet).and_then(|v| ctx.check_decoded(v)))
        .collect::<Result<Vec<u32>, CodecError>>()?;

    values.sort_unstable();
    Ok(values)
}
