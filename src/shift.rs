//! Bit-precise shifts with carry propagation between words.
//!
//! A left shift by `k` moves bit `i` to `i - k`; a right shift moves it to
//! `i + k`. With the MSB-first layout this is the direction the rendered
//! string moves: `"#.##." << 1 == ".##.."`. Length never changes, vacated
//! positions read as zero, and negative amounts shift the other way.

use std::ops::{Shl, ShlAssign, Shr, ShrAssign};

use crate::dynamic_bits::{DynamicBits, WORD_BITS};

/// Bits of `word` that a left shift by `offset` pushes into the previous word.
#[inline]
fn carry_left(word: u64, offset: usize) -> u64 {
    if offset == 0 {
        0
    } else {
        word >> (WORD_BITS - offset)
    }
}

/// Bits of `word` that a right shift by `offset` pushes into the next word.
#[inline]
fn carry_right(word: u64, offset: usize) -> u64 {
    if offset == 0 {
        0
    } else {
        word << (WORD_BITS - offset)
    }
}

impl<const WORDS: usize> DynamicBits<WORDS> {
    /// Move every bit `amount` places towards index 0.
    pub fn shifted_left(&self, amount: usize) -> Self {
        if amount == 0 {
            return self.clone();
        }
        let mut result = Self::zeros(self.len);
        if amount >= self.len {
            return result;
        }

        let word_offset = amount / WORD_BITS;
        let bit_offset = amount % WORD_BITS;
        let mut carry = 0u64;
        // Highest word first: each target takes the carry of the word above it.
        for source in (word_offset..self.words.len()).rev() {
            let word = self.logical_word(source);
            result.words[source - word_offset] = (word << bit_offset) | carry;
            carry = carry_left(word, bit_offset);
        }
        result.clean_tail();
        result
    }

    /// Move every bit `amount` places away from index 0.
    pub fn shifted_right(&self, amount: usize) -> Self {
        if amount == 0 {
            return self.clone();
        }
        let mut result = Self::zeros(self.len);
        if amount >= self.len {
            return result;
        }

        let word_offset = amount / WORD_BITS;
        let bit_offset = amount % WORD_BITS;
        let mut carry = 0u64;
        for source in 0..self.words.len() - word_offset {
            let word = self.logical_word(source);
            result.words[source + word_offset] = (word >> bit_offset) | carry;
            carry = carry_right(word, bit_offset);
        }
        result.clean_tail();
        result
    }
}

/// Amounts too large for `usize` shift everything out anyway.
#[inline]
fn saturating_amount<T: TryInto<usize>>(amount: T) -> usize {
    amount.try_into().unwrap_or(usize::MAX)
}

/// Splits a shift amount into direction and magnitude.
trait ShiftAmount {
    /// `(reversed, magnitude)`; `reversed` is set for negative amounts.
    fn split(self) -> (bool, usize);
}

macro_rules! impl_shift_amount {
    (unsigned: $($u:ty),*; signed: $($s:ty),*) => {
        $(
            impl ShiftAmount for $u {
                fn split(self) -> (bool, usize) {
                    (false, saturating_amount(self))
                }
            }
        )*
        $(
            impl ShiftAmount for $s {
                fn split(self) -> (bool, usize) {
                    (self < 0, saturating_amount(self.unsigned_abs()))
                }
            }
        )*
    };
}

impl_shift_amount!(
    unsigned: u8, u16, u32, u64, u128, usize;
    signed: i8, i16, i32, i64, i128, isize
);

impl<const WORDS: usize> DynamicBits<WORDS> {
    fn shifted<T: ShiftAmount>(&self, amount: T, left: bool) -> Self {
        let (reversed, magnitude) = amount.split();
        if left != reversed {
            self.shifted_left(magnitude)
        } else {
            self.shifted_right(magnitude)
        }
    }
}

macro_rules! impl_shift_ops {
    ($($t:ty),*) => {$(
        impl<const WORDS: usize> Shl<$t> for &DynamicBits<WORDS> {
            type Output = DynamicBits<WORDS>;

            fn shl(self, amount: $t) -> DynamicBits<WORDS> {
                self.shifted(amount, true)
            }
        }

        impl<const WORDS: usize> Shr<$t> for &DynamicBits<WORDS> {
            type Output = DynamicBits<WORDS>;

            fn shr(self, amount: $t) -> DynamicBits<WORDS> {
                self.shifted(amount, false)
            }
        }

        impl<const WORDS: usize> Shl<$t> for DynamicBits<WORDS> {
            type Output = DynamicBits<WORDS>;

            fn shl(self, amount: $t) -> DynamicBits<WORDS> {
                self.shifted(amount, true)
            }
        }

        impl<const WORDS: usize> Shr<$t> for DynamicBits<WORDS> {
            type Output = DynamicBits<WORDS>;

            fn shr(self, amount: $t) -> DynamicBits<WORDS> {
                self.shifted(amount, false)
            }
        }

        impl<const WORDS: usize> ShlAssign<$t> for DynamicBits<WORDS> {
            fn shl_assign(&mut self, amount: $t) {
                *self = self.shifted(amount, true);
            }
        }

        impl<const WORDS: usize> ShrAssign<$t> for DynamicBits<WORDS> {
            fn shr_assign(&mut self, amount: $t) {
                *self = self.shifted(amount, false);
            }
        }
    )*};
}

impl_shift_ops!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
