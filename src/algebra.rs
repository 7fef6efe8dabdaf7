//! Bitwise boolean algebra: AND, OR, XOR and NOT.
//!
//! Binary operations combine the two operands word by word over the union of
//! their allocated words, with a missing word reading as zero. The result is
//! `max(len)` bits long. Operands of different lengths are not an error, but
//! position-accurate results need matching lengths.
//!
//! Operands may use different inline capacities. Binary forms keep the
//! left operand's capacity.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::dynamic_bits::DynamicBits;

impl<const N: usize> DynamicBits<N> {
    fn combine_assign<const M: usize>(&mut self, other: &DynamicBits<M>, op: impl Fn(u64, u64) -> u64) {
        self.clean_tail();
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (i, word) in self.words.iter_mut().enumerate() {
            *word = op(*word, other.logical_word(i));
        }
        self.len = self.len.max(other.len);
        self.clean_tail();
    }
}

macro_rules! impl_bitwise_op {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl<const N: usize, const M: usize> $assign_trait<&DynamicBits<M>> for DynamicBits<N> {
            fn $assign_fn(&mut self, rhs: &DynamicBits<M>) {
                self.combine_assign(rhs, |a, b| a $op b);
            }
        }

        impl<const N: usize, const M: usize> $assign_trait<DynamicBits<M>> for DynamicBits<N> {
            fn $assign_fn(&mut self, rhs: DynamicBits<M>) {
                self.combine_assign(&rhs, |a, b| a $op b);
            }
        }

        impl<const N: usize, const M: usize> $op_trait<&DynamicBits<M>> for &DynamicBits<N> {
            type Output = DynamicBits<N>;

            fn $op_fn(self, rhs: &DynamicBits<M>) -> DynamicBits<N> {
                let mut result = self.clone();
                result.combine_assign(rhs, |a, b| a $op b);
                result
            }
        }

        impl<const N: usize, const M: usize> $op_trait<&DynamicBits<M>> for DynamicBits<N> {
            type Output = DynamicBits<N>;

            fn $op_fn(mut self, rhs: &DynamicBits<M>) -> DynamicBits<N> {
                self.combine_assign(rhs, |a, b| a $op b);
                self
            }
        }

        impl<const N: usize, const M: usize> $op_trait<DynamicBits<M>> for DynamicBits<N> {
            type Output = DynamicBits<N>;

            fn $op_fn(mut self, rhs: DynamicBits<M>) -> DynamicBits<N> {
                self.combine_assign(&rhs, |a, b| a $op b);
                self
            }
        }
    };
}

impl_bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl<const WORDS: usize> Not for &DynamicBits<WORDS> {
    type Output = DynamicBits<WORDS>;

    fn not(self) -> DynamicBits<WORDS> {
        !self.clone()
    }
}

impl<const WORDS: usize> Not for DynamicBits<WORDS> {
    type Output = DynamicBits<WORDS>;

    fn not(mut self) -> DynamicBits<WORDS> {
        for word in self.words.iter_mut() {
            *word = !*word;
        }
        self.clean_tail();
        self
    }
}
