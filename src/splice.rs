//! Word-level splicing primitives shared by the packed containers.
//!
//! Bits are packed LSB-first into `u32` words: bit `b` of a sequence lives
//! in word `b >> 5` at position `b & 31`. Every helper here works on raw
//! word slices and leaves length bookkeeping to the caller.

/// Number of payload bits per storage word.
pub(crate) const WORD_BITS: usize = 32;

/// Number of words needed to hold `bits` bits.
#[inline]
pub(crate) const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// A mask with the `n` lowest bits set, for `n <= 32`.
#[inline]
pub(crate) const fn low_mask(n: usize) -> u32 {
    debug_assert!(n <= WORD_BITS);
    if n == WORD_BITS {
        u32::MAX
    } else {
        (1u32 << n) - 1
    }
}

/// Reads `n <= 32` bits starting at bit `bit`, zero-extending past the end
/// of `words`.
#[inline]
pub(crate) fn read_bits(words: &[u32], bit: usize, n: usize) -> u32 {
    debug_assert!(n <= WORD_BITS);
    let w = bit >> 5;
    let o = bit & 31;
    let mut value = words.get(w).copied().unwrap_or(0) >> o;
    if o != 0 {
        value |= words.get(w + 1).copied().unwrap_or(0) << (WORD_BITS - o);
    }
    value & low_mask(n)
}

/// Writes the low `n <= 32` bits of `value` at bit `bit`, preserving all
/// surrounding bits. The destination words must exist.
#[inline]
pub(crate) fn write_bits(words: &mut [u32], bit: usize, n: usize, value: u32) {
    debug_assert!(n <= WORD_BITS);
    if n == 0 {
        return;
    }
    let w = bit >> 5;
    let o = bit & 31;
    let take = n.min(WORD_BITS - o);
    let mask = low_mask(take) << o;
    words[w] = (words[w] & !mask) | ((value << o) & mask);
    if n > take {
        let mask = low_mask(n - take);
        words[w + 1] = (words[w + 1] & !mask) | ((value >> take) & mask);
    }
}

/// Moves `len` bits from `src_bit` to `dst_bit` within the same slice.
///
/// Overlapping ranges are handled by walking low-to-high when the bits move
/// down and high-to-low when they move up, so each chunk is read before any
/// chunk that could clobber it is written.
pub(crate) fn copy_bits(words: &mut [u32], dst_bit: usize, src_bit: usize, len: usize) {
    if len == 0 || dst_bit == src_bit {
        return;
    }
    if dst_bit < src_bit {
        let mut done = 0;
        while done < len {
            let n = (len - done).min(WORD_BITS);
            let chunk = read_bits(words, src_bit + done, n);
            write_bits(words, dst_bit + done, n, chunk);
            done += n;
        }
    } else {
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(WORD_BITS);
            remaining -= n;
            let chunk = read_bits(words, src_bit + remaining, n);
            write_bits(words, dst_bit + remaining, n, chunk);
        }
    }
}

/// Copies the first `len` bits of `src` into `dst` starting at `dst_bit`.
pub(crate) fn copy_from(dst: &mut [u32], dst_bit: usize, src: &[u32], len: usize) {
    let mut done = 0;
    while done < len {
        let n = (len - done).min(WORD_BITS);
        let chunk = read_bits(src, done, n);
        write_bits(dst, dst_bit + done, n, chunk);
        done += n;
    }
}

/// Fills `len` bits starting at `bit` with a constant value.
pub(crate) fn fill_bits(words: &mut [u32], bit: usize, len: usize, value: bool) {
    let fill = if value { u32::MAX } else { 0 };
    let mut done = 0;
    while done < len {
        let b = bit + done;
        let o = b & 31;
        let n = (len - done).min(WORD_BITS - o);
        let mask = low_mask(n) << o;
        let w = b >> 5;
        words[w] = (words[w] & !mask) | (fill & mask);
        done += n;
    }
}
