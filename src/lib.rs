//! Bit-packed collections.
//!
//! Two structures share a word-splicing core:
//!
//! * [`BitList`]: a growable sequence of bits with positional insertion and
//!   removal, in-place boolean algebra, circular shifts, and packed
//!   import/export in word, byte, and bool form.
//! * [`CharSet`]: a sparse set of 16-bit code units backed by a lazily
//!   allocated two-level bitmap, with optional case folding via
//!   [`CaseFolding`].

mod bitlist;
mod charset;
mod error;
mod fold;
mod splice;

#[cfg(test)]
mod tests_model;

pub use bitlist::{BitList, Bits};
pub use charset::{CharSet, Units};
pub use error::Error;
pub use fold::CaseFolding;
