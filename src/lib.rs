//! This file is the root of the `multiset_codec` crate.
//!
//! The crate turns a multiset of small positive integers into a short printable
//! string and back. Three encodings compete for every input (run-length,
//! bit-packed frequency table and direct enumeration) and the planner keeps the
//! shortest one that decodes back to exactly the input.
//!
//! ```
//! let encoded = multiset_codec::serialize(&[3, 1, 2, 2, 300]).unwrap();
//! let decoded = multiset_codec::deserialize(&encoded).unwrap();
//! assert_eq!(decoded, vec![1, 2, 2, 3, 300]);
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod alphabet;
pub mod codec;
pub mod config;
pub mod error;
pub mod kernels;
pub mod planner;
pub mod stateless_api;
pub mod strategies;


//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use alphabet::{Alphabet, SEP, TERM};
pub use codec::{Codec, EncodingStats};
pub use config::{CodecConfig, OutOfRangePolicy};
pub use error::CodecError;
pub use observability::enable_verbose_logging;
pub use planner::CandidateReport;
pub use stateless_api::{analyze, deserialize, serialize};
pub use strategies::Method;
