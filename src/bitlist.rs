//! A growable list of bits with positional editing.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::Error;
use crate::splice::{
    copy_bits, copy_from, fill_bits, low_mask, read_bits, words_for, write_bits, WORD_BITS,
};

/// A dynamic sequence of booleans packed 32 to a word.
///
/// Bits are stored LSB-first: bit `i` lives in word `i >> 5` at position
/// `i & 31`. The list supports positional insertion and removal of bit
/// ranges, in-place boolean algebra against an equal-length operand, and
/// circular shifts. Storage grows amortized like a `Vec`; bits past the
/// logical length are never observable.
#[derive(Clone, Default)]
pub struct BitList {
    words: Vec<u32>,
    len: usize,
}

impl BitList {
    /// Creates an empty list.
    pub fn new() -> Self {
        BitList {
            words: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty list with room for at least `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        BitList {
            words: Vec::with_capacity(words_for(bits)),
            len: 0,
        }
    }

    /// Creates a list of `len` copies of `value`.
    pub fn repeat(value: bool, len: usize) -> Self {
        let fill = if value { u32::MAX } else { 0 };
        BitList {
            words: vec![fill; words_for(len)],
            len,
        }
    }

    /// Creates a list from packed words, 32 bits per element.
    pub fn from_words(words: &[u32]) -> Self {
        BitList {
            words: words.to_vec(),
            len: words.len() * WORD_BITS,
        }
    }

    /// Creates a list from packed bytes, 8 bits per element, LSB-first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut list = BitList::with_capacity(bytes.len() * 8);
        list.extend_from_bytes(bytes);
        list
    }

    /// Number of bits in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bits the list can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.words.capacity() * WORD_BITS
    }

    /// Returns the bit at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index < self.len {
            Some(self.bit(index))
        } else {
            None
        }
    }

    /// Sets the bit at `index`.
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), Error> {
        if index >= self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.put_bit(index, value);
        Ok(())
    }

    /// Appends a single bit.
    pub fn push(&mut self, value: bool) {
        self.reserve_bits(self.len + 1);
        let index = self.len;
        self.len += 1;
        self.put_bit(index, value);
    }

    /// Appends 32 bits from a packed word.
    pub fn push_word(&mut self, word: u32) {
        self.reserve_bits(self.len + WORD_BITS);
        write_bits(&mut self.words, self.len, WORD_BITS, word);
        self.len += WORD_BITS;
    }

    /// Appends packed words, 32 bits per element.
    pub fn extend_from_words(&mut self, words: &[u32]) {
        self.reserve_bits(self.len + words.len() * WORD_BITS);
        for &word in words {
            write_bits(&mut self.words, self.len, WORD_BITS, word);
            self.len += WORD_BITS;
        }
    }

    /// Appends packed bytes, 8 bits per element, LSB-first.
    pub fn extend_from_bytes(&mut self, bytes: &[u8]) {
        self.reserve_bits(self.len + bytes.len() * 8);
        for &byte in bytes {
            write_bits(&mut self.words, self.len, 8, byte as u32);
            self.len += 8;
        }
    }

    /// Appends `count` copies of `value`.
    pub fn extend_with(&mut self, count: usize, value: bool) {
        self.reserve_bits(self.len + count);
        fill_bits(&mut self.words, self.len, count, value);
        self.len += count;
    }

    /// Inserts `count` copies of `value` at `index`, shifting the tail up.
    pub fn insert_range(&mut self, index: usize, count: usize, value: bool) -> Result<(), Error> {
        if index > self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.open_gap(index, count);
        fill_bits(&mut self.words, index, count, value);
        Ok(())
    }

    /// Inserts the contents of `other` at `index`, shifting the tail up.
    pub fn insert_bits(&mut self, index: usize, other: &BitList) -> Result<(), Error> {
        if index > self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        // The gap bits are garbage until copy_from overwrites every one.
        self.open_gap(index, other.len);
        copy_from(&mut self.words, index, &other.words, other.len);
        Ok(())
    }

    /// Inserts packed words at `index`, 32 bits per element.
    pub fn insert_words(&mut self, index: usize, words: &[u32]) -> Result<(), Error> {
        if index > self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        let count = words.len() * WORD_BITS;
        self.open_gap(index, count);
        copy_from(&mut self.words, index, words, count);
        Ok(())
    }

    /// Removes `count` bits starting at `index`, shifting the tail down.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), Error> {
        let end = index.checked_add(count).filter(|&end| end <= self.len);
        let Some(end) = end else {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        };
        copy_bits(&mut self.words, index, end, self.len - end);
        self.len -= count;
        Ok(())
    }

    /// Overwrites `count` bits starting at `index` with `value`.
    pub fn fill(&mut self, index: usize, count: usize, value: bool) -> Result<(), Error> {
        if index.checked_add(count).filter(|&end| end <= self.len).is_none() {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        fill_bits(&mut self.words, index, count, value);
        Ok(())
    }

    /// Overwrites every bit with `value`, keeping the length.
    pub fn fill_all(&mut self, value: bool) {
        fill_bits(&mut self.words, 0, self.len, value);
    }

    /// Removes all bits.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Shortens the list to `len` bits. Does nothing if already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Drops storage beyond what the current length needs.
    pub fn shrink_to_fit(&mut self) {
        self.words.truncate(words_for(self.len));
        self.words.shrink_to_fit();
    }

    /// Whether every bit is set. Vacuously true when empty.
    pub fn all_true(&self) -> bool {
        let full = self.len / WORD_BITS;
        if self.words[..full].iter().any(|&w| w != u32::MAX) {
            return false;
        }
        let rem = self.len & 31;
        rem == 0 || self.words[full] & low_mask(rem) == low_mask(rem)
    }

    /// Whether every bit is clear. Vacuously true when empty.
    pub fn all_false(&self) -> bool {
        let full = self.len / WORD_BITS;
        if self.words[..full].iter().any(|&w| w != 0) {
            return false;
        }
        let rem = self.len & 31;
        rem == 0 || self.words[full] & low_mask(rem) == 0
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        let full = self.len / WORD_BITS;
        let mut count: usize = self.words[..full].iter().map(|w| w.count_ones() as usize).sum();
        let rem = self.len & 31;
        if rem > 0 {
            count += (self.words[full] & low_mask(rem)).count_ones() as usize;
        }
        count
    }

    /// Index of the first bit equal to `value`, scanning a word at a time.
    pub fn index_of(&self, value: bool) -> Option<usize> {
        let full = self.len / WORD_BITS;
        for (i, &word) in self.words[..full].iter().enumerate() {
            let skip = if value { 0 } else { u32::MAX };
            if word == skip {
                continue;
            }
            let bit = if value {
                word.trailing_zeros()
            } else {
                word.trailing_ones()
            };
            return Some(i * WORD_BITS + bit as usize);
        }
        let rem = self.len & 31;
        if rem > 0 {
            let word = self.words[full];
            let bit = if value {
                (word & low_mask(rem)).trailing_zeros()
            } else {
                (word | !low_mask(rem)).trailing_ones()
            } as usize;
            if bit < rem {
                return Some(full * WORD_BITS + bit);
            }
        }
        None
    }

    /// In-place AND against an equal-length operand.
    pub fn and(&mut self, other: &BitList) -> Result<(), Error> {
        let n = self.check_len(other)?;
        for (a, b) in self.words[..n].iter_mut().zip(&other.words[..n]) {
            *a &= *b;
        }
        Ok(())
    }

    /// In-place OR against an equal-length operand.
    pub fn or(&mut self, other: &BitList) -> Result<(), Error> {
        let n = self.check_len(other)?;
        for (a, b) in self.words[..n].iter_mut().zip(&other.words[..n]) {
            *a |= *b;
        }
        Ok(())
    }

    /// In-place XOR against an equal-length operand.
    pub fn xor(&mut self, other: &BitList) -> Result<(), Error> {
        let n = self.check_len(other)?;
        for (a, b) in self.words[..n].iter_mut().zip(&other.words[..n]) {
            *a ^= *b;
        }
        Ok(())
    }

    /// Flips every bit in place.
    pub fn not(&mut self) {
        let n = words_for(self.len);
        for word in &mut self.words[..n] {
            *word = !*word;
        }
    }

    /// Circularly shifts every bit `offset` positions toward higher indices.
    ///
    /// Bits that fall off the high end reappear at index zero. The offset is
    /// taken modulo the length, so no shift amount can lose bits.
    pub fn shift_left(&mut self, offset: usize) {
        if self.len == 0 {
            return;
        }
        let k = offset % self.len;
        if k == 0 {
            return;
        }
        // Rotate by k via triple reversal: the top k bits of the reversed
        // list become the bottom k bits of the result.
        self.reverse_range(0, self.len);
        self.reverse_range(0, k);
        self.reverse_range(k, self.len - k);
    }

    /// Circularly shifts every bit `offset` positions toward lower indices.
    pub fn shift_right(&mut self, offset: usize) {
        if self.len == 0 {
            return;
        }
        let k = offset % self.len;
        if k != 0 {
            self.shift_left(self.len - k);
        }
    }

    /// Packs the list into `dest[offset..]`, 32 bits per word, LSB-first.
    /// Unused high bits of the final word are zero.
    pub fn copy_to_words(&self, dest: &mut [u32], offset: usize) -> Result<(), Error> {
        let needed = words_for(self.len);
        let available = dest.len().saturating_sub(offset);
        if available < needed {
            return Err(Error::DestinationTooSmall { needed, available });
        }
        let full = self.len / WORD_BITS;
        dest[offset..offset + full].copy_from_slice(&self.words[..full]);
        let rem = self.len & 31;
        if rem > 0 {
            dest[offset + full] = self.words[full] & low_mask(rem);
        }
        Ok(())
    }

    /// Packs the list into `dest[offset..]`, 8 bits per byte, LSB-first.
    /// Unused high bits of the final byte are zero.
    pub fn copy_to_bytes(&self, dest: &mut [u8], offset: usize) -> Result<(), Error> {
        let needed = self.len.div_ceil(8);
        let available = dest.len().saturating_sub(offset);
        if available < needed {
            return Err(Error::DestinationTooSmall { needed, available });
        }
        for i in 0..needed {
            let n = (self.len - i * 8).min(8);
            dest[offset + i] = read_bits(&self.words, i * 8, n) as u8;
        }
        Ok(())
    }

    /// Unpacks the list into `dest[offset..]`, one bool per bit.
    pub fn copy_to_bools(&self, dest: &mut [bool], offset: usize) -> Result<(), Error> {
        let available = dest.len().saturating_sub(offset);
        if available < self.len {
            return Err(Error::DestinationTooSmall {
                needed: self.len,
                available,
            });
        }
        for i in 0..self.len {
            dest[offset + i] = self.bit(i);
        }
        Ok(())
    }

    /// Iterates the bits in index order.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            words: &self.words,
            len: self.len,
            pos: 0,
            word: 0,
        }
    }

    #[inline]
    fn bit(&self, index: usize) -> bool {
        self.words[index >> 5] >> (index & 31) & 1 == 1
    }

    #[inline]
    fn put_bit(&mut self, index: usize, value: bool) {
        let mask = 1u32 << (index & 31);
        if value {
            self.words[index >> 5] |= mask;
        } else {
            self.words[index >> 5] &= !mask;
        }
    }

    /// Grows storage to hold at least `bits` bits, doubling like a `Vec`.
    /// Newly exposed words hold garbage until a write covers them.
    fn reserve_bits(&mut self, bits: usize) {
        let needed = words_for(bits);
        if needed > self.words.len() {
            let grown = needed.max(self.words.len() * 2);
            self.words.resize(grown, 0);
        }
    }

    /// Makes room for `count` bits at `index <= len` by shifting the tail up.
    /// The gap contents are unspecified until the caller writes them.
    fn open_gap(&mut self, index: usize, count: usize) {
        self.reserve_bits(self.len + count);
        if index < self.len {
            copy_bits(&mut self.words, index + count, index, self.len - index);
        }
        self.len += count;
    }

    fn check_len(&self, other: &BitList) -> Result<usize, Error> {
        if self.len != other.len {
            return Err(Error::LengthMismatch {
                left: self.len,
                right: other.len,
            });
        }
        Ok(words_for(self.len))
    }

    fn reverse_range(&mut self, start: usize, count: usize) {
        let mut i = start;
        let mut j = start + count;
        while i + 1 < j {
            j -= 1;
            let a = self.bit(i);
            let b = self.bit(j);
            self.put_bit(i, b);
            self.put_bit(j, a);
            i += 1;
        }
    }
}

impl PartialEq for BitList {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let full = self.len / WORD_BITS;
        if self.words[..full] != other.words[..full] {
            return false;
        }
        let rem = self.len & 31;
        rem == 0 || (self.words[full] ^ other.words[full]) & low_mask(rem) == 0
    }
}

impl Eq for BitList {}

impl Hash for BitList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        let full = self.len / WORD_BITS;
        for &word in &self.words[..full] {
            state.write_u32(word);
        }
        let rem = self.len & 31;
        if rem > 0 {
            state.write_u32(self.words[full] & low_mask(rem));
        }
    }
}

impl fmt::Debug for BitList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitList[{}; ", self.len)?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}

impl FromIterator<bool> for BitList {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut list = BitList::new();
        list.extend(iter);
        list
    }
}

impl Extend<bool> for BitList {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_bits(self.len + iter.size_hint().0);
        for bit in iter {
            self.push(bit);
        }
    }
}

impl<'a> IntoIterator for &'a BitList {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Bits<'a> {
        self.iter()
    }
}

/// Iterator over the bits of a [`BitList`], one word fetch per 32 bits.
pub struct Bits<'a> {
    words: &'a [u32],
    len: usize,
    pos: usize,
    word: u32,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.len {
            return None;
        }
        if self.pos & 31 == 0 {
            self.word = self.words[self.pos >> 5];
        }
        let bit = self.word & 1 == 1;
        self.word >>= 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}
