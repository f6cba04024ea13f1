//! Line mode.
//!
//! The blitter runs a Bresenham stepper, one pixel per BLTSIZE row. With a
//! line from (x1, y1) spanning dx along the major axis and dy along the
//! minor one, software programs:
//!
//! ```text
//!     BLTAPTL = 4dy - 2dx   initial error, SIGN set if negative
//!     BLTAMOD = 4(dy - dx)  added when the error is non-negative
//!     BLTBMOD = 4dy         added when the error is negative
//!     BLTADAT = $8000, ASH = x1 & 15
//!     BLTBDAT = texture ($FFFF for a solid line)
//!     BLTCPT = BLTDPT = word holding the first pixel
//!     BLTCMOD = BLTDMOD = bitplane row stride in bytes
//! ```

use emu_core::WordMemory;

use super::Blitter;
use crate::minterm::apply_minterm;

impl Blitter {
    pub(super) fn run_line<M: WordMemory + ?Sized>(&mut self, memory: &mut M) {
        let mask = memory.word_mask();
        let octant = self.line_octant();
        let single_dot = self.single_dot_per_major_step();

        // The pointer registers hold word addresses; the error term was
        // written as a byte quantity, so sign-extend bits 0-15 of the byte
        // address and drop back to word units like the modulos.
        let mut error = i32::from((self.pointers[0] << 1) as u16 as i16) >> 1;
        let mut draw = true;

        for _ in 0..self.height {
            if draw {
                let address = self.pointers[3] & mask;
                self.c_data = memory.read_word(address);
                let output = apply_minterm(
                    self.a_data >> (self.shifts[0] & 15),
                    self.b_data,
                    self.c_data,
                    self.minterms,
                );
                memory.write_word(address, output);
                self.not_zero |= output != 0;
                draw &= !single_dot;
            }

            let major_sign = if octant.major_negative { -1 } else { 1 };
            let minor_sign = if octant.minor_negative { -1 } else { 1 };
            let (mut dx, mut dy) = if octant.x_major {
                (major_sign, 0)
            } else {
                (0, major_sign)
            };

            if error < 0 {
                error += self.modulos[1];
            } else {
                if octant.x_major {
                    dy = minor_sign;
                } else {
                    dx = minor_sign;
                }
                error += self.modulos[0];
            }

            if dx < 0 {
                if self.shifts[0] == 0 {
                    self.shifts[0] = 15;
                    self.pointers[3] = self.pointers[3].wrapping_sub(1);
                } else {
                    self.shifts[0] -= 1;
                }
            } else if dx > 0 {
                if self.shifts[0] >= 15 {
                    self.shifts[0] = 0;
                    self.pointers[3] = self.pointers[3].wrapping_add(1);
                } else {
                    self.shifts[0] += 1;
                }
            }

            if dy != 0 {
                self.pointers[3] = self.pointers[3].wrapping_add_signed(dy * self.modulos[2]);
                draw = true;
            }
        }
    }
}
