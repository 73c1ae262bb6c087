//! A sparse set of 16-bit code units with optional case folding.

use std::hash::{Hash, Hasher};

use crate::fold::CaseFolding;

/// Top-level slots: each covers 1024 consecutive code units.
const TOP_LEN: usize = 64;
/// Presence words per block, 32 bits each.
const BLOCK_WORDS: usize = 32;

/// A set of UTF-16 code units backed by a two-level lazy bitmap.
///
/// The 65536-unit space is split into 64 slots of 1024 units; a slot's
/// block is allocated on first write and holds 32 presence words. A
/// case-insensitive set stores canonical (upper-case) units and carries a
/// second plane of 32 flag words recording which members were originally
/// inserted in lower case, so enumeration can reproduce them.
///
/// Set operations between two sets with the same folding configuration run
/// word-by-word over populated blocks; mixed configurations fall back to
/// element-wise iteration.
#[derive(Clone, Debug)]
pub struct CharSet {
    blocks: Box<[Option<Box<[u32]>>; TOP_LEN]>,
    len: usize,
    folding: Option<CaseFolding>,
}

impl CharSet {
    /// Creates an empty case-sensitive set.
    pub fn new() -> Self {
        Self::with_config(None)
    }

    /// Creates an empty set that folds case with `folding`.
    pub fn case_insensitive(folding: CaseFolding) -> Self {
        Self::with_config(Some(folding))
    }

    fn with_config(folding: Option<CaseFolding>) -> Self {
        CharSet {
            blocks: Box::new(std::array::from_fn(|_| None)),
            len: 0,
            folding,
        }
    }

    /// Creates a case-sensitive set from code units.
    pub fn from_units<I: IntoIterator<Item = u16>>(units: I) -> Self {
        let mut set = Self::new();
        set.extend(units);
        set
    }

    /// Creates a case-folding set from code units.
    pub fn from_units_folded<I: IntoIterator<Item = u16>>(units: I, folding: CaseFolding) -> Self {
        let mut set = Self::case_insensitive(folding);
        set.extend(units);
        set
    }

    /// Creates a case-sensitive set from the UTF-16 units of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::from_units(text.encode_utf16())
    }

    /// Creates a case-folding set from the UTF-16 units of `text`.
    pub fn from_text_folded(text: &str, folding: CaseFolding) -> Self {
        Self::from_units_folded(text.encode_utf16(), folding)
    }

    /// Number of members, counted over canonical units.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The folding configuration, or `None` for a case-sensitive set.
    pub fn folding(&self) -> Option<&CaseFolding> {
        self.folding.as_ref()
    }

    #[inline]
    pub fn is_case_insensitive(&self) -> bool {
        self.folding.is_some()
    }

    /// Words per block: one presence plane, plus a flag plane when folding.
    #[inline]
    fn block_len(&self) -> usize {
        if self.folding.is_some() {
            BLOCK_WORDS * 2
        } else {
            BLOCK_WORDS
        }
    }

    #[inline]
    fn canonical(&self, unit: u16) -> u16 {
        match &self.folding {
            Some(folding) => folding.to_upper(unit),
            None => unit,
        }
    }

    /// Adds `unit`. Returns whether the set changed. Under folding the
    /// canonical form is stored, and a flag bit records a lower-case
    /// original so enumeration can reproduce it.
    pub fn insert(&mut self, unit: u16) -> bool {
        let canon = self.canonical(unit);
        let (slot, word, mask) = split(canon);
        let block_len = self.block_len();
        let block = self.blocks[slot]
            .get_or_insert_with(|| vec![0u32; block_len].into_boxed_slice());
        if block[word] & mask != 0 {
            return false;
        }
        block[word] |= mask;
        if canon != unit {
            block[word + BLOCK_WORDS] |= mask;
        }
        self.len += 1;
        true
    }

    /// Removes `unit` (any case form under folding). Returns whether the
    /// set changed.
    pub fn remove(&mut self, unit: u16) -> bool {
        let canon = self.canonical(unit);
        let (slot, word, mask) = split(canon);
        let folded = self.folding.is_some();
        let Some(block) = self.blocks[slot].as_deref_mut() else {
            return false;
        };
        if block[word] & mask == 0 {
            return false;
        }
        block[word] &= !mask;
        if folded {
            block[word + BLOCK_WORDS] &= !mask;
        }
        self.len -= 1;
        true
    }

    /// Whether `unit` (any case form under folding) is a member.
    pub fn contains(&self, unit: u16) -> bool {
        let (slot, word, mask) = split(self.canonical(unit));
        match self.blocks[slot].as_deref() {
            Some(block) => block[word] & mask != 0,
            None => false,
        }
    }

    /// Removes every member, releasing all blocks.
    pub fn clear(&mut self) {
        for block in self.blocks.iter_mut() {
            *block = None;
        }
        self.len = 0;
    }

    /// Releases blocks whose presence plane went empty.
    pub fn trim_excess(&mut self) {
        for slot in self.blocks.iter_mut() {
            if matches!(slot.as_deref(), Some(block) if presence_empty(block)) {
                *slot = None;
            }
        }
    }

    /// Whether `other` shares this set's folding configuration, which
    /// permits word-level set operations.
    #[inline]
    fn compatible(&self, other: &CharSet) -> bool {
        self.folding == other.folding
    }

    /// Adds every member of `other`.
    ///
    /// With a compatible operand this merges populated blocks word by word,
    /// OR-ing flag bits only for newly added members. Otherwise it falls
    /// back to inserting `other`'s representatives one at a time.
    pub fn union_with(&mut self, other: &CharSet) {
        if !self.compatible(other) {
            for unit in other.iter() {
                self.insert(unit);
            }
            return;
        }
        let folded = self.folding.is_some();
        for slot in 0..TOP_LEN {
            let Some(other_block) = other.blocks[slot].as_deref() else {
                continue;
            };
            if let Some(block) = self.blocks[slot].as_deref_mut() {
                for word in 0..BLOCK_WORDS {
                    let added = !block[word] & other_block[word];
                    if added != 0 {
                        self.len += added.count_ones() as usize;
                        block[word] |= added;
                        if folded {
                            block[word + BLOCK_WORDS] |= other_block[word + BLOCK_WORDS] & added;
                        }
                    }
                }
            } else {
                self.len += presence_count(other_block);
                self.blocks[slot] = Some(Box::from(other_block));
            }
        }
    }

    /// Removes every member of `other`.
    ///
    /// Membership is decided on canonical units, so under folding either
    /// case form removes. Incompatible operands fall back to element-wise
    /// removal.
    pub fn except_with(&mut self, other: &CharSet) {
        if self.len == 0 {
            return;
        }
        if !self.compatible(other) {
            for unit in other.iter() {
                self.remove(unit);
            }
            return;
        }
        let folded = self.folding.is_some();
        for slot in 0..TOP_LEN {
            let Some(other_block) = other.blocks[slot].as_deref() else {
                continue;
            };
            let Some(block) = self.blocks[slot].as_deref_mut() else {
                continue;
            };
            for word in 0..BLOCK_WORDS {
                let removed = block[word] & other_block[word];
                if removed != 0 {
                    self.len -= removed.count_ones() as usize;
                    block[word] &= !removed;
                    if folded {
                        block[word + BLOCK_WORDS] &= !removed;
                    }
                }
            }
        }
    }

    /// Keeps only members also in `other`.
    ///
    /// With an incompatible operand the set is rebuilt from `other`'s
    /// representatives that this set contains, keeping this set's folding.
    pub fn intersect_with(&mut self, other: &CharSet) {
        if self.len == 0 {
            return;
        }
        if !self.compatible(other) {
            let mut kept = Self::with_config(self.folding);
            for unit in other.iter() {
                if self.contains(unit) {
                    kept.insert(unit);
                }
            }
            *self = kept;
            return;
        }
        let folded = self.folding.is_some();
        for slot in 0..TOP_LEN {
            if self.blocks[slot].is_none() {
                continue;
            }
            let Some(other_block) = other.blocks[slot].as_deref() else {
                if let Some(block) = self.blocks[slot].take() {
                    self.len -= presence_count(&block);
                }
                continue;
            };
            let Some(block) = self.blocks[slot].as_deref_mut() else {
                continue;
            };
            for word in 0..BLOCK_WORDS {
                let removed = block[word] & !other_block[word];
                if removed != 0 {
                    self.len -= removed.count_ones() as usize;
                    block[word] &= other_block[word];
                    if folded {
                        block[word + BLOCK_WORDS] &= other_block[word];
                    }
                }
            }
        }
    }

    /// Keeps members in exactly one of the two sets.
    ///
    /// An incompatible operand is first converted into this set's folding
    /// configuration, then combined word by word. For a member coming only
    /// from `other` the flag bit is taken from `other`; a member removed
    /// from both drops its flag.
    pub fn symmetric_except_with(&mut self, other: &CharSet) {
        if self.len == 0 {
            self.union_with(other);
            return;
        }
        if self.compatible(other) {
            self.symmetric_except_blocks(other);
        } else {
            let mut converted = Self::with_config(self.folding);
            converted.extend(other.iter());
            self.symmetric_except_blocks(&converted);
        }
    }

    fn symmetric_except_blocks(&mut self, other: &CharSet) {
        let folded = self.folding.is_some();
        for slot in 0..TOP_LEN {
            let Some(other_block) = other.blocks[slot].as_deref() else {
                continue;
            };
            let Some(block) = self.blocks[slot].as_deref_mut() else {
                self.len += presence_count(other_block);
                self.blocks[slot] = Some(Box::from(other_block));
                continue;
            };
            for word in 0..BLOCK_WORDS {
                if folded {
                    block[word + BLOCK_WORDS] &= !other_block[word];
                    block[word + BLOCK_WORDS] |= other_block[word + BLOCK_WORDS] & !block[word];
                }
                let before = block[word].count_ones() as usize;
                block[word] ^= other_block[word];
                self.len -= before;
                self.len += block[word].count_ones() as usize;
            }
        }
    }

    /// Whether every member of this set is in `other`.
    pub fn is_subset_of(&self, other: &CharSet) -> bool {
        if self.len == 0 {
            return true;
        }
        if self.compatible(other) {
            return self.len <= other.len && other.contains_all(self);
        }
        let (same, _) = self.count_members(other, false);
        same == self.len
    }

    /// Whether this set is a strict subset of `other`.
    pub fn is_proper_subset_of(&self, other: &CharSet) -> bool {
        if self.len == 0 {
            return other.len > 0;
        }
        if self.compatible(other) {
            return self.len < other.len && other.contains_all(self);
        }
        let (same, extra) = self.count_members(other, false);
        same == self.len && extra
    }

    /// Whether every member of `other` is in this set.
    pub fn is_superset_of(&self, other: &CharSet) -> bool {
        if other.len == 0 {
            return true;
        }
        if self.compatible(other) {
            return other.len <= self.len && self.contains_all(other);
        }
        other.iter().all(|unit| self.contains(unit))
    }

    /// Whether this set is a strict superset of `other`.
    pub fn is_proper_superset_of(&self, other: &CharSet) -> bool {
        if self.len == 0 {
            return false;
        }
        if other.len == 0 {
            return true;
        }
        if self.compatible(other) {
            return other.len < self.len && self.contains_all(other);
        }
        let (same, missing) = self.count_members(other, true);
        !missing && same < self.len
    }

    /// Whether the sets share at least one member.
    pub fn overlaps(&self, other: &CharSet) -> bool {
        if self.len == 0 || other.len == 0 {
            return false;
        }
        if !self.compatible(other) {
            return other.iter().any(|unit| self.contains(unit));
        }
        for slot in 0..TOP_LEN {
            let (Some(block), Some(other_block)) =
                (self.blocks[slot].as_deref(), other.blocks[slot].as_deref())
            else {
                continue;
            };
            for word in 0..BLOCK_WORDS {
                if block[word] & other_block[word] != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the sets hold the same members, judged on canonical units.
    pub fn set_equals(&self, other: &CharSet) -> bool {
        if self.compatible(other) {
            return self.len == other.len && self.contains_all(other);
        }
        let (same, missing) = self.count_members(other, true);
        !missing && same == self.len
    }

    /// Word-level containment test, valid only for a compatible operand.
    fn contains_all(&self, other: &CharSet) -> bool {
        for slot in 0..TOP_LEN {
            let Some(other_block) = other.blocks[slot].as_deref() else {
                continue;
            };
            match self.blocks[slot].as_deref() {
                Some(block) => {
                    for word in 0..BLOCK_WORDS {
                        if block[word] | other_block[word] != block[word] {
                            return false;
                        }
                    }
                }
                None => {
                    if !presence_empty(other_block) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Counts `other`'s distinct members (under this set's folding) that
    /// this set contains, and whether any member is missing. Used for the
    /// element-wise predicate fallbacks.
    fn count_members(&self, other: &CharSet, stop_on_missing: bool) -> (usize, bool) {
        let mut same = 0;
        let mut missing = false;
        let mut seen = Self::with_config(self.folding);
        for unit in other.iter() {
            if self.contains(unit) {
                if seen.insert(unit) {
                    same += 1;
                }
            } else {
                missing = true;
                if stop_on_missing {
                    break;
                }
            }
        }
        (same, missing)
    }

    /// Iterates members in canonical order. Under folding a member whose
    /// flag bit is set comes back lower-cased.
    pub fn iter(&self) -> Units<'_> {
        Units {
            set: self,
            cursor: 0,
            bits: 0,
        }
    }

    /// The representative for a stored canonical unit: lower-cased when the
    /// flag plane says the original insertion was lower case.
    fn representative(&self, canon: u16) -> u16 {
        let Some(folding) = &self.folding else {
            return canon;
        };
        let (slot, word, mask) = split(canon);
        match self.blocks[slot].as_deref() {
            Some(block) if block[word + BLOCK_WORDS] & mask != 0 => folding.to_lower(canon),
            _ => canon,
        }
    }
}

impl Default for CharSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CharSet {
    fn eq(&self, other: &Self) -> bool {
        if self.folding != other.folding || self.len != other.len {
            return false;
        }
        for slot in 0..TOP_LEN {
            let same = match (self.blocks[slot].as_deref(), other.blocks[slot].as_deref()) {
                (None, None) => true,
                (Some(block), None) | (None, Some(block)) => presence_empty(block),
                (Some(a), Some(b)) => a[..BLOCK_WORDS] == b[..BLOCK_WORDS],
            };
            if !same {
                return false;
            }
        }
        true
    }
}

impl Eq for CharSet {}

impl Hash for CharSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.folding.hash(state);
        // Empty and missing blocks must hash alike.
        for slot in 0..TOP_LEN {
            if let Some(block) = self.blocks[slot].as_deref() {
                if presence_empty(block) {
                    continue;
                }
                state.write_usize(slot);
                for &word in &block[..BLOCK_WORDS] {
                    state.write_u32(word);
                }
            }
        }
    }
}

impl Extend<u16> for CharSet {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for unit in iter {
            self.insert(unit);
        }
    }
}

impl FromIterator<u16> for CharSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self::from_units(iter)
    }
}

impl<'a> IntoIterator for &'a CharSet {
    type Item = u16;
    type IntoIter = Units<'a>;

    fn into_iter(self) -> Units<'a> {
        self.iter()
    }
}

#[inline]
fn split(unit: u16) -> (usize, usize, u32) {
    let slot = (unit >> 10) as usize;
    let word = ((unit >> 5) & 0x1F) as usize;
    let mask = 1u32 << (unit & 0x1F);
    (slot, word, mask)
}

fn presence_count(block: &[u32]) -> usize {
    block[..BLOCK_WORDS].iter().map(|w| w.count_ones() as usize).sum()
}

fn presence_empty(block: &[u32]) -> bool {
    block[..BLOCK_WORDS].iter().all(|&w| w == 0)
}

/// Iterator over the members of a [`CharSet`] in canonical order.
pub struct Units<'a> {
    set: &'a CharSet,
    /// Index of the next presence word to load, in `0..TOP_LEN * 32`.
    cursor: usize,
    /// Unvisited bits of the word at `cursor - 1`.
    bits: u32,
}

impl Iterator for Units<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        loop {
            if self.bits != 0 {
                let bit = self.bits.trailing_zeros() as usize;
                self.bits &= self.bits - 1;
                let canon = (((self.cursor - 1) << 5) | bit) as u16;
                return Some(self.set.representative(canon));
            }
            while self.cursor < TOP_LEN * BLOCK_WORDS {
                let slot = self.cursor >> 5;
                let Some(block) = self.set.blocks[slot].as_deref() else {
                    self.cursor = (slot + 1) << 5;
                    continue;
                };
                let word = self.cursor & 0x1F;
                self.cursor += 1;
                if block[word] != 0 {
                    self.bits = block[word];
                    break;
                }
            }
            if self.bits == 0 {
                return None;
            }
        }
    }
}
