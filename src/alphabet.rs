//! The printable symbol set shared by every encoding.
//!
//! An alphabet plays two roles. Its symbols are the digits of a base-B
//! positional numeral system (`kernels::scalar`), and its first 64 symbols carry
//! 6-bit groups for the bit-packed encoding (`kernels::bitpack`). The two wire
//! delimiters, `SEP` and `TERM`, are never part of an alphabet.

use std::fmt;
use std::sync::OnceLock;

use crate::error::CodecError;

/// Separates the fields of a record.
pub const SEP: char = ',';
/// Terminates a run-length record.
pub const TERM: char = ';';

/// Number of symbols needed to carry one 6-bit group.
pub const PACKED_SYMBOLS: usize = 64;

const NOT_IN_ALPHABET: u8 = u8::MAX;

/// An ordered set of distinct printable ASCII symbols.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    index: [u8; 128],
}

impl Alphabet {
    /// Builds an alphabet from `symbols` in order.
    ///
    /// Fails if a symbol is not printable ASCII, repeats, is one of the
    /// delimiters, or if there are fewer than 64 symbols. At most 255 symbols
    /// fit, but printable ASCII caps it well below that anyway.
    pub fn new(symbols: &str) -> Result<Self, CodecError> {
        let mut index = [NOT_IN_ALPHABET; 128];
        let mut bytes = Vec::with_capacity(symbols.len());

        for (i, c) in symbols.chars().enumerate() {
            if !c.is_ascii_graphic() {
                return Err(CodecError::InvalidAlphabet(format!(
                    "symbol {c:?} at position {i} is not printable ASCII"
                )));
            }
            if c == SEP || c == TERM {
                return Err(CodecError::InvalidAlphabet(format!(
                    "symbol {c:?} is reserved as a delimiter"
                )));
            }
            let b = c as u8;
            if index[b as usize] != NOT_IN_ALPHABET {
                return Err(CodecError::InvalidAlphabet(format!("symbol {c:?} appears twice")));
            }
            // Printable ASCII has 94 code points, so `i` always fits in u8.
            index[b as usize] = i as u8;
            bytes.push(b);
        }

        if bytes.len() < PACKED_SYMBOLS {
            return Err(CodecError::InvalidAlphabet(format!(
                "need at least {PACKED_SYMBOLS} symbols, got {}",
                bytes.len()
            )));
        }

        Ok(Self { symbols: bytes, index })
    }

    /// The process-wide standard alphabet: the 66 code points `'+'..='l'`
    /// minus the delimiters `,` and `;`, which leaves exactly 64 symbols.
    pub fn standard() -> &'static Alphabet {
        static STANDARD: OnceLock<Alphabet> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let symbols: String = ('+'..='l').filter(|&c| c != SEP && c != TERM).collect();
            Alphabet::new(&symbols).unwrap_or_else(|e| unreachable!("standard alphabet is valid: {e}"))
        })
    }

    /// The numeral base B.
    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    /// The symbol for `digit`, if `digit < base()`.
    #[inline]
    pub fn symbol(&self, digit: usize) -> Option<char> {
        self.symbols.get(digit).map(|&b| b as char)
    }

    /// The digit value of `c`, or `None` if `c` is not a symbol.
    #[inline]
    pub fn digit(&self, c: char) -> Option<usize> {
        if !c.is_ascii() {
            return None;
        }
        match self.index[c as usize] {
            NOT_IN_ALPHABET => None,
            d => Some(d as usize),
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.digit(c).is_some()
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().map(|&b| b as char)
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("base", &self.base())
            .field("symbols", &String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}
