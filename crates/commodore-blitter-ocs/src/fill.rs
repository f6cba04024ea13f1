//! Area fill.
//!
//! Fill runs after the minterm unit, from bit 0 up to bit 15, carrying a
//! single "inside" bit along the word. The serial logic is simulated once per
//! nibble at compile time and packed into two tables keyed by
//!
//! ```text
//!     b0-b3: input nibble
//!     b4:    carry in
//!     b5:    exclusive fill
//! ```
//!
//! so that filling a word is four shift-and-mask lookups.

/// Fill flavour selected by BLTCON1 bits 3 (IFE) and 4 (EFE).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillMode {
    /// Both edges of a span are kept.
    Inclusive,
    /// Only the leading edge toggles; the trailing edge bit is cleared.
    Exclusive,
}

impl FillMode {
    const fn key(self) -> usize {
        match self {
            FillMode::Inclusive => 0,
            FillMode::Exclusive => 1 << 5,
        }
    }
}

/// Bit-serial fill of one nibble. Returns `(filled nibble, carry out)`.
const fn fill_nibble(exclusive: bool, carry: u8, nibble: u8) -> (u8, u8) {
    let mut carry = carry & 1;
    let mut output = 0;
    let mut bit = 0;
    while bit < 4 {
        let set = (nibble >> bit) & 1;
        let (pre_toggle, post_toggle) = if exclusive {
            (set, 0)
        } else {
            // Set bits switch filling on immediately, but switch it off only
            // after being drawn themselves.
            (set & !carry & 1, set & carry)
        };

        carry ^= pre_toggle;
        output |= carry << bit;
        carry ^= post_toggle;
        bit += 1;
    }
    (output, carry)
}

const fn key_parts(index: usize) -> (bool, u8, u8) {
    (index & 0x20 != 0, ((index >> 4) & 1) as u8, (index & 0xF) as u8)
}

const fn build_values() -> [u32; 8] {
    let mut table = [0u32; 8];
    let mut index = 0;
    while index < 64 {
        let (exclusive, carry, nibble) = key_parts(index);
        let (value, _) = fill_nibble(exclusive, carry, nibble);
        table[index >> 3] |= (value as u32) << ((index & 7) * 4);
        index += 1;
    }
    table
}

const fn build_carries() -> [u32; 2] {
    let mut table = [0u32; 2];
    let mut index = 0;
    while index < 64 {
        let (exclusive, carry, nibble) = key_parts(index);
        let (_, carry_out) = fill_nibble(exclusive, carry, nibble);
        table[index >> 5] |= (carry_out as u32) << (index & 31);
        index += 1;
    }
    table
}

/// Filled nibbles, eight per word.
const FILL_VALUES: [u32; 8] = build_values();

/// Carry out of each nibble, one bit per key.
const FILL_CARRIES: [u32; 2] = build_carries();

/// Look up the fill of one nibble. Returns `(filled nibble, carry out)`.
#[must_use]
pub const fn fill_lookup(nibble: u8, carry: bool, mode: FillMode) -> (u8, bool) {
    let index = (nibble as usize & 0xF) | ((carry as usize) << 4) | mode.key();
    let value = (FILL_VALUES[index >> 3] >> ((index & 7) * 4)) & 0xF;
    let carry_out = (FILL_CARRIES[index >> 5] >> (index & 31)) & 1;
    (value as u8, carry_out != 0)
}

/// Fill a whole word, least significant nibble first.
///
/// Returns the filled word and the carry leaving bit 15, which feeds the next
/// word of the same row.
#[must_use]
pub const fn fill_word(word: u16, carry: bool, mode: FillMode) -> (u16, bool) {
    let mut output = 0u16;
    let mut carry = carry;
    let mut shift = 0;
    while shift < 16 {
        let (value, carry_out) = fill_lookup(((word >> shift) & 0xF) as u8, carry, mode);
        output |= (value as u16) << shift;
        carry = carry_out;
        shift += 4;
    }
    (output, carry)
}
