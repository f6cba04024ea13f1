//! Minterm logic unit.
//!
//! BLTCON0 bits 0-7 (LF0-LF7) form a truth table over the three source bits.
//! For each bit position the triple (A, B, C) selects entry `A<<2 | B<<1 | C`
//! of the table, and that entry becomes the output bit.

/// Common LF values from the Hardware Reference Manual.
pub mod lf {
    /// D = A.
    pub const COPY_A: u8 = 0xF0;
    /// D = B.
    pub const COPY_B: u8 = 0xCC;
    /// D = C.
    pub const COPY_C: u8 = 0xAA;
    /// D = AB + A'C: cookie-cut B through mask A over background C. Also the
    /// usual line-draw function.
    pub const COOKIE_CUT: u8 = 0xCA;
    /// D = A XOR C: line draw in XOR mode.
    pub const XOR_A_C: u8 = 0x5A;
    /// D = 0.
    pub const CLEAR: u8 = 0x00;
    /// D = 1.
    pub const SET: u8 = 0xFF;
}

/// Apply the LF truth table `minterms` to the words `a`, `b` and `c`.
#[must_use]
pub const fn apply_minterm(a: u16, b: u16, c: u16, minterms: u8) -> u16 {
    let mut output = 0u16;
    let mut index = 0;
    while index < 8 {
        if minterms & (1 << index) != 0 {
            let a_term = if index & 4 != 0 { a } else { !a };
            let b_term = if index & 2 != 0 { b } else { !b };
            let c_term = if index & 1 != 0 { c } else { !c };
            output |= a_term & b_term & c_term;
        }
        index += 1;
    }
    output
}
