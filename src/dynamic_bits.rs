//! Growable bit vector with inline small-buffer storage.
//!
//! # Layout
//!
//! Bits are packed into 64-bit words, most significant bit first:
//! logical bit `i` lives in word `i / 64` at bit position `63 - i % 64`.
//! Read left to right, the words spell the vector the same way
//! [`DynamicBits::render`] does, so shifting the words left moves every
//! logical bit towards index 0.
//!
//! Storage is a [`SmallVec`] holding up to `WORDS` words inline; longer
//! vectors spill to the heap. `WORDS` never changes the value of any bit.
//!
//! # Clean tail
//!
//! Bits of the last word at positions `>= len` are zero after every
//! whole-vector transform (NOT, shifts, AND/OR/XOR) and after
//! [`truncate`](DynamicBits::truncate) or [`pop_back`](DynamicBits::pop_back).
//! [`resize`](DynamicBits::resize) does not clean, so growing after a
//! shrinking `resize` may expose stale bits.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;

use smallvec::SmallVec;
use tracing::trace;

use crate::error::{Error, Result};

pub(crate) const WORD_BITS: usize = 64;

/// Word index and single-bit mask for logical bit `idx`.
#[inline]
pub(crate) fn word_index_and_mask(idx: usize) -> (usize, u64) {
    let mask = 1u64 << (WORD_BITS - 1 - idx % WORD_BITS);
    (idx / WORD_BITS, mask)
}

/// Mask of the in-use bits of the final word, `None` when the word is full.
#[inline]
pub(crate) fn tail_mask(len: usize) -> Option<u64> {
    match len % WORD_BITS {
        0 => None,
        used => Some(!0u64 << (WORD_BITS - used)),
    }
}

/// A growable bit vector holding up to `WORDS * 64` bits without allocating.
#[derive(Clone, Default)]
pub struct DynamicBits<const WORDS: usize = 1> {
    /// Packed bits, `len.div_ceil(64)` words.
    pub(crate) words: SmallVec<[u64; WORDS]>,
    pub(crate) len: usize,
}

impl<const WORDS: usize> DynamicBits<WORDS> {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self {
            words: SmallVec::new(),
            len: 0,
        }
    }

    /// Create an empty vector with room for at least `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: SmallVec::with_capacity(bits.div_ceil(WORD_BITS)),
            len: 0,
        }
    }

    /// A vector of `len` clear bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            words: SmallVec::from_elem(0, len.div_ceil(WORD_BITS)),
            len,
        }
    }

    /// A vector of `len` set bits.
    pub fn ones(len: usize) -> Self {
        let mut bits = Self {
            words: SmallVec::from_elem(!0, len.div_ceil(WORD_BITS)),
            len,
        };
        bits.clean_tail();
        bits
    }

    /// Build from raw MSB-first words.
    ///
    /// Extra words are dropped, missing words read as zero, and bits past
    /// `len` are cleared.
    pub fn from_words(len: usize, words: &[u64]) -> Self {
        let word_count = len.div_ceil(WORD_BITS);
        let mut stored: SmallVec<[u64; WORDS]> = words.iter().copied().take(word_count).collect();
        stored.resize(word_count, 0);
        let mut bits = Self { words: stored, len };
        bits.clean_tail();
        bits
    }

    /// Build from any sequence of values convertible to `bool`.
    pub fn from_bools<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<bool>,
    {
        values.into_iter().collect()
    }

    /// Build by testing every char of `s` against `high`.
    pub fn parse_with(s: &str, high: char) -> Self {
        s.chars().map(|ch| ch == high).collect()
    }

    /// Replace the contents with `values`.
    pub fn assign<I, B>(&mut self, values: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<bool>,
    {
        *self = Self::from_bools(values);
    }

    /// Number of bits held inline before spilling to the heap.
    pub const fn inline_capacity() -> usize {
        WORDS * WORD_BITS
    }

    /// Logical number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the vector holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bits that fit in the current allocation.
    pub fn capacity(&self) -> usize {
        self.words.capacity() * WORD_BITS
    }

    /// Return true if storage has moved to the heap.
    pub fn spilled(&self) -> bool {
        self.words.spilled()
    }

    /// The backing words, MSB-first.
    ///
    /// Bits past `len` in the last word are zero unless a shrinking
    /// [`resize`](Self::resize) left them behind.
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Ensure room for at least `bits` bits in total without changing the length.
    pub fn reserve(&mut self, bits: usize) {
        let needed = bits.div_ceil(WORD_BITS);
        if needed <= self.words.len() {
            return;
        }
        let was_spilled = self.words.spilled();
        self.words.reserve(needed - self.words.len());
        if !was_spilled && self.words.spilled() {
            trace!(
                bits,
                inline_bits = Self::inline_capacity(),
                "dynamic bits spilled to heap"
            );
        }
    }

    /// Set the logical length to `new_len`.
    ///
    /// Keeps the bits below `min(len, new_len)`. Words added on growth are
    /// zero, but bits a previous shrink left in the old last word are not
    /// cleared, so do not rely on a grown region reading as zero.
    pub fn resize(&mut self, new_len: usize) {
        self.reserve(new_len);
        self.words.resize(new_len.div_ceil(WORD_BITS), 0);
        self.len = new_len;
    }

    /// Shorten to `new_len` bits and clear everything past it.
    ///
    /// Does nothing if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        self.words.truncate(new_len.div_ceil(WORD_BITS));
        self.len = new_len;
        self.clean_tail();
    }

    /// Remove every bit.
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }

    /// Return the bit at `idx`.
    ///
    /// `idx` must be below `len`; this is only checked in debug builds.
    #[inline]
    pub fn get_bit(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "index {idx} out of range for length {}", self.len);
        let (word, mask) = word_index_and_mask(idx);
        (self.words[word] & mask) != 0
    }

    /// Set the bit at `idx` to `value`.
    ///
    /// `idx` must be below `len`; this is only checked in debug builds.
    #[inline]
    pub fn set_bit(&mut self, idx: usize, value: bool) {
        debug_assert!(idx < self.len, "index {idx} out of range for length {}", self.len);
        let (word, mask) = word_index_and_mask(idx);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Bounds-checked [`get_bit`](Self::get_bit).
    pub fn try_get_bit(&self, idx: usize) -> Result<bool> {
        self.check_index(idx)?;
        Ok(self.get_bit(idx))
    }

    /// Bounds-checked [`set_bit`](Self::set_bit).
    pub fn try_set_bit(&mut self, idx: usize, value: bool) -> Result<()> {
        self.check_index(idx)?;
        self.set_bit(idx, value);
        Ok(())
    }

    fn check_index(&self, idx: usize) -> Result<()> {
        if idx >= self.len {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Append one bit.
    pub fn push_back(&mut self, value: bool) {
        let idx = self.len;
        if idx % WORD_BITS == 0 {
            self.words.push(0);
        }
        self.len += 1;
        // The slot may hold a stale bit left by a shrinking `resize`.
        self.set_bit(idx, value);
    }

    /// Remove and return the last bit, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<bool> {
        let idx = self.len.checked_sub(1)?;
        let value = self.get_bit(idx);
        if idx % WORD_BITS == 0 {
            self.words.pop();
        } else {
            self.set_bit(idx, false);
        }
        self.len = idx;
        Some(value)
    }

    /// Number of set bits.
    pub fn popcount(&self) -> usize {
        (0..self.words.len())
            .map(|i| self.logical_word(i).count_ones() as usize)
            .sum()
    }

    /// Number of clear bits.
    pub fn count_zeros(&self) -> usize {
        self.len - self.popcount()
    }

    /// Iterate over the bits in index order.
    pub fn iter(&self) -> Iter<'_, WORDS> {
        Iter {
            bits: self,
            front: 0,
            back: self.len,
        }
    }

    /// One char per bit: `high` where set, `low` where clear.
    pub fn render(&self, high: char, low: char) -> String {
        self.iter().map(|bit| if bit { high } else { low }).collect()
    }

    /// [`render`](Self::render) with a space for clear bits.
    pub fn render_high(&self, high: char) -> String {
        self.render(high, ' ')
    }

    /// Word `i` with stale tail bits masked off, zero past the end.
    #[inline]
    pub(crate) fn logical_word(&self, i: usize) -> u64 {
        let Some(&word) = self.words.get(i) else {
            return 0;
        };
        match tail_mask(self.len) {
            Some(mask) if i + 1 == self.words.len() => word & mask,
            _ => word,
        }
    }

    pub(crate) fn clean_tail(&mut self) {
        if let (Some(mask), Some(last)) = (tail_mask(self.len), self.words.last_mut()) {
            *last &= mask;
        }
    }
}

impl<const WORDS: usize> fmt::Debug for DynamicBits<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBits")
            .field("len", &self.len)
            .field("ones", &self.popcount())
            .field("inline_words", &WORDS)
            .field("spilled", &self.spilled())
            .field("bits", &self.render('1', '0'))
            .finish()
    }
}

impl<const WORDS: usize> fmt::Display for DynamicBits<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl<const WORDS: usize> FromStr for DynamicBits<WORDS> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = Self::with_capacity(s.len());
        for (position, ch) in s.chars().enumerate() {
            match ch {
                '0' => bits.push_back(false),
                '1' => bits.push_back(true),
                _ => return Err(Error::InvalidChar { ch, position }),
            }
        }
        Ok(bits)
    }
}

impl<const N: usize, const M: usize> PartialEq<DynamicBits<M>> for DynamicBits<N> {
    fn eq(&self, other: &DynamicBits<M>) -> bool {
        self.len == other.len
            && (0..self.words.len()).all(|i| self.logical_word(i) == other.logical_word(i))
    }
}

impl<const WORDS: usize> Eq for DynamicBits<WORDS> {}

impl<const WORDS: usize> Hash for DynamicBits<WORDS> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for i in 0..self.words.len() {
            self.logical_word(i).hash(state);
        }
    }
}

impl<B: Into<bool>, const WORDS: usize> FromIterator<B> for DynamicBits<WORDS> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        let mut bits = Self::new();
        bits.extend(iter);
        bits
    }
}

impl<B: Into<bool>, const WORDS: usize> Extend<B> for DynamicBits<WORDS> {
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(self.len + iter.size_hint().0);
        for value in iter {
            self.push_back(value.into());
        }
    }
}

impl<const WORDS: usize> From<&[bool]> for DynamicBits<WORDS> {
    fn from(values: &[bool]) -> Self {
        values.iter().copied().collect()
    }
}

/// Iterator over the bits of a [`DynamicBits`].
#[derive(Debug, Clone)]
pub struct Iter<'a, const WORDS: usize> {
    bits: &'a DynamicBits<WORDS>,
    front: usize,
    back: usize,
}

impl<const WORDS: usize> Iterator for Iter<'_, WORDS> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        let bit = self.bits.get_bit(self.front);
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<const WORDS: usize> DoubleEndedIterator for Iter<'_, WORDS> {
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.bits.get_bit(self.back))
    }
}

impl<const WORDS: usize> ExactSizeIterator for Iter<'_, WORDS> {}

impl<const WORDS: usize> FusedIterator for Iter<'_, WORDS> {}

impl<'a, const WORDS: usize> IntoIterator for &'a DynamicBits<WORDS> {
    type Item = bool;
    type IntoIter = Iter<'a, WORDS>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> DynamicBits {
        DynamicBits::from_bools([true, false, true, true, false])
    }

    #[test]
    fn test_scenario_popcount_and_render() {
        let bits = scenario();
        assert_eq!(bits.len(), 5);
        assert_eq!(bits.popcount(), 3);
        assert_eq!(bits.render('#', '.'), "#.##.");
        assert_eq!(bits.render_high('#'), "# ## ");
        assert_eq!(bits.to_string(), "10110");
    }

    #[test]
    fn test_msb_first_layout() {
        let bits = scenario();
        assert_eq!(bits.as_words(), &[0b10110u64 << 59]);
    }

    #[test]
    fn test_push_back_allocates_per_word() {
        let mut bits: DynamicBits = DynamicBits::new();
        for i in 0..64 {
            bits.push_back(i % 3 == 0);
        }
        assert_eq!(bits.as_words().len(), 1);
        bits.push_back(true);
        assert_eq!(bits.as_words().len(), 2);
        assert!(bits.get_bit(64));
        assert_eq!(bits.popcount(), 22 + 1);
    }

    #[test]
    fn test_pop_back_reverses_pushes() {
        let input = [true, false, false, true, true];
        let mut bits: DynamicBits = DynamicBits::new();
        for _ in 0..13 {
            bits.extend(input);
        }
        assert_eq!(bits.len(), 65);
        assert_eq!(bits.as_words().len(), 2);

        assert_eq!(bits.pop_back(), Some(true));
        assert_eq!(bits.len(), 64);
        assert_eq!(bits.as_words().len(), 1);

        let mut expected: Vec<bool> = input.iter().copied().cycle().take(64).collect();
        while let Some(bit) = bits.pop_back() {
            assert_eq!(Some(bit), expected.pop());
            assert_eq!(bits.popcount(), expected.iter().filter(|&&b| b).count());
        }
        assert!(bits.is_empty());
        assert!(bits.as_words().is_empty());
        assert_eq!(bits.pop_back(), None);
    }

    #[test]
    fn test_set_bit_updates_popcount() {
        let mut bits: DynamicBits<2> = DynamicBits::zeros(100);
        bits.set_bit(0, true);
        bits.set_bit(63, true);
        bits.set_bit(64, true);
        bits.set_bit(99, true);
        assert_eq!(bits.popcount(), 4);
        bits.set_bit(63, false);
        assert_eq!(bits.popcount(), 3);
        assert!(!bits.get_bit(63));
        assert!(bits.get_bit(99));
    }

    #[test]
    fn test_try_access_reports_bounds() {
        let mut bits = scenario();
        assert_eq!(bits.try_get_bit(2), Ok(true));
        assert_eq!(
            bits.try_get_bit(5),
            Err(Error::IndexOutOfBounds { index: 5, len: 5 })
        );
        assert!(bits.try_set_bit(5, true).is_err());
        bits.try_set_bit(4, true).unwrap();
        assert_eq!(bits.render('#', '.'), "#.###");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_get_bit_past_len_panics_in_debug() {
        let bits = scenario();
        bits.get_bit(5);
    }

    #[test]
    fn test_resize_keeps_prefix() {
        let mut bits = scenario();
        bits.resize(130);
        assert_eq!(bits.len(), 130);
        assert_eq!(bits.as_words().len(), 3);
        assert_eq!(&bits.render('1', '0')[..5], "10110");
        bits.resize(3);
        assert_eq!(bits.as_words().len(), 1);
        assert_eq!(bits.render('1', '0'), "101");
    }

    #[test]
    fn test_resize_does_not_clean_tail() {
        let mut bits = scenario();
        bits.resize(2);
        // bits 2 and 3 are still set in the word
        assert_eq!(bits.as_words(), &[0b10110u64 << 59]);
        assert_eq!(bits, DynamicBits::<1>::from_bools([true, false]));
    }

    #[test]
    fn test_push_after_shrinking_resize_overwrites_stale_bits() {
        let mut bits = scenario();
        bits.resize(2);
        bits.push_back(false);
        assert!(!bits.get_bit(2));
        assert_eq!(bits.render('1', '0'), "100");
        assert_eq!(bits.popcount(), 1);

        let mut ones: DynamicBits = "1111".parse().unwrap();
        ones.resize(1);
        ones.extend([false; 3]);
        assert_eq!(ones.to_string(), "1000");
        assert_eq!(ones.popcount(), 1);
    }

    #[test]
    fn test_counts_ignore_stale_tail() {
        let mut bits: DynamicBits = "1111".parse().unwrap();
        bits.resize(1);
        assert_eq!(bits.popcount(), 1);
        assert_eq!(bits.count_zeros(), 0);

        let mut wide: DynamicBits<2> = DynamicBits::ones(100);
        wide.resize(70);
        assert_eq!(wide.popcount(), 70);
        assert_eq!(wide.count_zeros(), 0);
        wide.resize(3);
        assert_eq!(wide.count_zeros(), 0);
        assert_eq!(wide.popcount(), 3);
    }

    #[test]
    fn test_truncate_cleans_tail() {
        let mut bits = scenario();
        bits.truncate(2);
        assert_eq!(bits.as_words(), &[0b10u64 << 62]);
        assert_eq!(bits.popcount(), 1);
        bits.truncate(10);
        assert_eq!(bits.len(), 2);
    }

    #[test]
    fn test_zeros_and_ones() {
        let ones: DynamicBits = DynamicBits::ones(70);
        assert_eq!(ones.popcount(), 70);
        assert_eq!(ones.as_words()[1], !0u64 << 58);
        let zeros: DynamicBits = DynamicBits::zeros(70);
        assert_eq!(zeros.count_zeros(), 70);
    }

    #[test]
    fn test_from_words_masks_and_pads() {
        let bits: DynamicBits = DynamicBits::from_words(3, &[!0, !0]);
        assert_eq!(bits.as_words(), &[0b111u64 << 61]);
        let padded: DynamicBits = DynamicBits::from_words(65, &[1]);
        assert_eq!(padded.as_words(), &[1, 0]);
    }

    #[test]
    fn test_reserve_spills_past_inline_capacity() {
        let mut bits: DynamicBits<2> = DynamicBits::new();
        assert_eq!(DynamicBits::<2>::inline_capacity(), 128);
        bits.reserve(128);
        assert!(!bits.spilled());
        bits.reserve(129);
        assert!(bits.spilled());
        assert!(bits.capacity() >= 129);
        assert!(bits.is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        let bits: DynamicBits = "10110".parse().unwrap();
        assert_eq!(bits, scenario());
        assert_eq!(
            "10x".parse::<DynamicBits>(),
            Err(Error::InvalidChar {
                ch: 'x',
                position: 2
            })
        );
        let grid_row: DynamicBits = DynamicBits::parse_with("#.##.", '#');
        assert_eq!(grid_row, scenario());
    }

    #[test]
    fn test_equality_across_capacities() {
        let small = scenario();
        let large: DynamicBits<4> = DynamicBits::from_bools([true, false, true, true, false]);
        assert_eq!(small, large);
        assert_ne!(small, DynamicBits::<1>::from_bools([true, false, true, true]));
    }

    #[test]
    fn test_iter_both_ends() {
        let bits = scenario();
        let forward: Vec<bool> = bits.iter().collect();
        assert_eq!(forward, vec![true, false, true, true, false]);
        let backward: Vec<bool> = bits.iter().rev().collect();
        assert_eq!(backward, vec![false, true, true, false, true]);
        assert_eq!(bits.iter().len(), 5);
    }

    #[test]
    fn test_take_leaves_empty_reusable_vector() {
        let mut bits = scenario();
        let moved = std::mem::take(&mut bits);
        assert_eq!(moved.popcount(), 3);
        assert!(bits.is_empty());
        bits.push_back(true);
        assert_eq!(bits.render('#', '.'), "#");
    }

    #[test]
    fn test_assign_replaces_contents() {
        let mut bits = scenario();
        bits.assign([false, true]);
        assert_eq!(bits.render('#', '.'), ".#");
    }
}
