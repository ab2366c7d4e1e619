//! Pure, stateless building blocks shared by the encoding strategies.
//!
//! Nothing in here knows about method markers or wire records; the strategies
//! in `crate::strategies` compose these kernels into complete encodings.

pub mod bitpack;
pub mod runs;
pub mod scalar;
