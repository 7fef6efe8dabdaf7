//! # Dynamic Bits
//!
//! *A growable bit string that stays on the stack while it is short.*
//!
//! ## Intuition First
//!
//! Picture a row of a puzzle grid: `#.##.`. Turning each char into a bit and
//! packing the bits into machine words lets a whole row be intersected,
//! merged or slid sideways with a handful of word instructions instead of a
//! loop over chars. Most rows are short, so the words live inline and no
//! allocation happens at all.
//!
//! ## The Problem
//!
//! `Vec<bool>` spends a byte per bit and gives no word-level algebra.
//! Fixed-size bitsets need the length up front. Heap-backed bit vectors pay
//! an allocation even for eight bits.
//!
//! ## Layout
//!
//! Bits are stored most significant bit first, so bit 0 is the top bit of
//! word 0:
//!
//! ```text
//! logical   # . # # .
//! index     0 1 2 3 4
//! word 0    1 0 1 1 0 0 0 ... 0   (bit 63 down to bit 0)
//! ```
//!
//! A left shift of the words is then a left shift of the rendered string.
//! The inline capacity is a const parameter counted in 64-bit words.
//!
//! ## What Could Go Wrong
//!
//! 1. **Stale tails**: `resize` does not clear bits past the new length. Bitwise
//!    operators, shifts and `truncate` always do.
//! 2. **Mismatched lengths**: AND/OR/XOR of vectors with different lengths
//!    combine raw words; the result has the longer length.
//! 3. **Unchecked indexing**: `get_bit`/`set_bit` only check bounds in debug
//!    builds. Use `try_get_bit`/`try_set_bit` for untrusted indices.
//!
//! ## Example
//!
//! ```
//! use dbits::DynamicBits;
//!
//! let row: DynamicBits = DynamicBits::parse_with("#.##.", '#');
//! assert_eq!(row.popcount(), 3);
//! assert_eq!((&row << 1u32).render('#', '.'), ".##..");
//! assert_eq!((&row >> 2u32).render('#', '.'), "..#.#");
//! assert_eq!((!&row).render('#', '.'), ".#..#");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algebra;
pub mod dynamic_bits;
pub mod encoding;
pub mod error;
#[cfg(feature = "serde")]
mod serde;
pub mod shift;

pub use dynamic_bits::{DynamicBits, Iter};
pub use error::{Error, Result};
