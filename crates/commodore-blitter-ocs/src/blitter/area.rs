//! Area mode: rectangular copy with shift, minterm logic and fill.

use emu_core::WordMemory;

use super::Blitter;
use crate::fill::fill_word;
use crate::minterm::apply_minterm;

impl Blitter {
    /// Fetch the next word for source channel `index` if it is enabled,
    /// otherwise leave its latch and pointer alone.
    fn fetch_source<M: WordMemory + ?Sized>(&mut self, index: usize, memory: &M, mask: u32) {
        if !self.channel_enables[index] {
            return;
        }
        let word = memory.read_word(self.pointers[index] & mask);
        match index {
            0 => self.a_data = word,
            1 => self.b_data = word,
            _ => self.c_data = word,
        }
        self.pointers[index] = self.pointers[index].wrapping_add_signed(self.direction());
    }

    pub(super) fn run_area<M: WordMemory + ?Sized>(&mut self, memory: &mut M) {
        let mask = memory.word_mask();
        let direction = self.direction();
        let descending = self.descending_address_mode();
        let fill_mode = self.fill_mode();
        let a_shift = u32::from(self.shifts[0] & 15);
        let b_shift = u32::from(self.shifts[1] & 15);

        // The shifters carry the previous word across rows; they are only
        // cleared at the start of the blit.
        let mut a32: u32 = 0;
        let mut b32: u32 = 0;

        for _ in 0..self.height {
            let mut fill_carry = self.fill_carry;

            for column in 0..self.width {
                let mut a_mask = 0xFFFF;
                if column == 0 {
                    a_mask &= self.a_mask[0];
                }
                if column == self.width - 1 {
                    a_mask &= self.a_mask[1];
                }

                self.fetch_source(0, memory, mask);
                self.fetch_source(1, memory, mask);
                self.fetch_source(2, memory, mask);

                a32 = (a32 << 16) | u32::from(self.a_data & a_mask);
                b32 = (b32 << 16) | u32::from(self.b_data);

                // Ascending blits shift right; descending blits shift left,
                // pulling the low bits round from the previous word.
                let (a, b) = if descending {
                    (a32.rotate_left(a_shift) as u16, b32.rotate_left(b_shift) as u16)
                } else {
                    ((a32 >> a_shift) as u16, (b32 >> b_shift) as u16)
                };

                let mut output = apply_minterm(a, b, self.c_data, self.minterms);

                if let Some(mode) = fill_mode {
                    let (filled, carry) = fill_word(output, fill_carry, mode);
                    output = filled;
                    fill_carry = carry;
                }

                self.not_zero |= output != 0;

                if self.channel_enables[3] {
                    memory.write_word(self.pointers[3] & mask, output);
                    self.pointers[3] = self.pointers[3].wrapping_add_signed(direction);
                }
            }

            for index in 0..4 {
                if self.channel_enables[index] {
                    self.pointers[index] =
                        self.pointers[index].wrapping_add_signed(self.modulos[index] * direction);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use emu_core::ChipRam;

    use crate::blitter::Channel;
    use crate::interrupt::InterruptLatch;
    use crate::minterm::lf;
    use crate::Blitter;

    fn ram() -> ChipRam {
        ChipRam::new(0x1000).unwrap()
    }

    #[test]
    fn shifters_carry_across_rows() {
        let mut ram = ram();
        ram.load_words(0x100, &[0xFFFF, 0x0000]);

        let mut blitter = Blitter::new();
        blitter.set_bltcon0(0x49F0 | u16::from(lf::COPY_A));
        blitter.set_bltcon1(0x0000);
        blitter.set_first_word_mask(0xFFFF);
        blitter.set_last_word_mask(0xFFFF);
        blitter.set_pointer(Channel::A, 0x100);
        blitter.set_pointer(Channel::D, 0x200);
        blitter.set_size((2 << 6) | 1);

        blitter.advance_dma(&mut ram, &mut InterruptLatch::new()).unwrap();

        // Row 0 shifts in zeroes; row 1 picks up the low nibble of row 0.
        assert_eq!(ram.word_at(0x200), 0x0FFF);
        assert_eq!(ram.word_at(0x202), 0xF000);
    }

    #[test]
    fn disabled_channels_keep_pointer_through_modulo() {
        let mut ram = ram();
        let mut blitter = Blitter::new();
        blitter.set_bltcon0(0x0100);
        blitter.set_pointer(Channel::B, 0x400);
        blitter.set_modulo(Channel::B, 100);
        blitter.set_pointer(Channel::D, 0x200);
        blitter.set_modulo(Channel::D, 4);
        blitter.set_size((3 << 6) | 2);

        blitter.advance_dma(&mut ram, &mut InterruptLatch::new()).unwrap();

        assert_eq!(blitter.pointer_address(Channel::B), 0x400);
        assert_eq!(blitter.pointer_address(Channel::D), 0x200 + 3 * (4 + 4));
    }
}
