//! Case folding configurations for [`CharSet`](crate::CharSet).

use std::fmt;
use std::hash::{Hash, Hasher};

/// A case conversion pair used by case-insensitive character sets.
///
/// The canonical form of a code unit is its upper-case mapping; the
/// lower-case mapping is only consulted when enumerating, to restore the
/// case a unit was originally inserted with. Two foldings compare equal
/// when their tags match, so sets built from the same configuration can
/// combine word-by-word.
#[derive(Clone, Copy)]
pub struct CaseFolding {
    tag: &'static str,
    upper: fn(u16) -> u16,
    lower: fn(u16) -> u16,
}

impl CaseFolding {
    /// Simple one-to-one case mapping over the Basic Multilingual Plane.
    /// Units whose mapping would expand to multiple code units, and lone
    /// surrogates, map to themselves.
    pub const SIMPLE: CaseFolding = CaseFolding {
        tag: "simple",
        upper: simple_upper,
        lower: simple_lower,
    };

    /// Case mapping restricted to ASCII `a..=z` / `A..=Z`.
    pub const ASCII: CaseFolding = CaseFolding {
        tag: "ascii",
        upper: ascii_upper,
        lower: ascii_lower,
    };

    /// Builds a custom folding. The tag is the identity: foldings with equal
    /// tags are treated as interchangeable, so tags must pair with one
    /// conversion behavior.
    pub const fn new(tag: &'static str, upper: fn(u16) -> u16, lower: fn(u16) -> u16) -> Self {
        CaseFolding { tag, upper, lower }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[inline]
    pub fn to_upper(&self, unit: u16) -> u16 {
        (self.upper)(unit)
    }

    #[inline]
    pub fn to_lower(&self, unit: u16) -> u16 {
        (self.lower)(unit)
    }
}

impl PartialEq for CaseFolding {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for CaseFolding {}

impl Hash for CaseFolding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl fmt::Debug for CaseFolding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CaseFolding").field(&self.tag).finish()
    }
}

fn simple_upper(unit: u16) -> u16 {
    let Some(ch) = char::from_u32(unit as u32) else {
        return unit;
    };
    let mut mapped = ch.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(up), None) if (up as u32) <= 0xFFFF => up as u16,
        _ => unit,
    }
}

fn simple_lower(unit: u16) -> u16 {
    let Some(ch) = char::from_u32(unit as u32) else {
        return unit;
    };
    let mut mapped = ch.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(low), None) if (low as u32) <= 0xFFFF => low as u16,
        _ => unit,
    }
}

fn ascii_upper(unit: u16) -> u16 {
    if (b'a' as u16..=b'z' as u16).contains(&unit) {
        unit - 0x20
    } else {
        unit
    }
}

fn ascii_lower(unit: u16) -> u16 {
    if (b'A' as u16..=b'Z' as u16).contains(&unit) {
        unit + 0x20
    } else {
        unit
    }
}
