//! Word-addressable memory seen by DMA devices.

use thiserror::Error;

/// Errors raised while constructing a memory array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("memory size must be non-zero")]
    Empty,

    #[error("memory size {words} words is not a power of two")]
    NotPowerOfTwo { words: usize },
}

/// Memory as seen by a DMA device: an array of 16-bit words.
///
/// The array size is a power of two. Devices mask every word index with
/// [`WordMemory::word_mask`] before calling `read_word`/`write_word`, so
/// implementations may assume indices are in range.
pub trait WordMemory {
    /// Mask that wraps a word index into the array.
    fn word_mask(&self) -> u32;

    /// Read the word at an already-masked index.
    fn read_word(&self, index: u32) -> u16;

    /// Write the word at an already-masked index.
    fn write_word(&mut self, index: u32, value: u16);
}

/// Chip RAM as a flat array of big-endian words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipRam {
    words: Vec<u16>,
    mask: u32,
}

impl ChipRam {
    /// Allocate zeroed chip RAM holding `words` 16-bit words.
    pub fn new(words: usize) -> Result<Self, MemoryError> {
        if words == 0 {
            return Err(MemoryError::Empty);
        }
        if !words.is_power_of_two() {
            return Err(MemoryError::NotPowerOfTwo { words });
        }
        Ok(Self {
            words: vec![0; words],
            mask: (words as u32).wrapping_sub(1),
        })
    }

    /// Size in words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Read the word containing `addr`, a byte address. Bit 0 is ignored.
    #[must_use]
    pub fn word_at(&self, addr: u32) -> u16 {
        self.words[((addr >> 1) & self.mask) as usize]
    }

    /// Write the word containing `addr`, a byte address. Bit 0 is ignored.
    pub fn set_word_at(&mut self, addr: u32, value: u16) {
        self.words[((addr >> 1) & self.mask) as usize] = value;
    }

    /// Copy `data` into consecutive words starting at byte address `addr`.
    pub fn load_words(&mut self, addr: u32, data: &[u16]) {
        let mut index = addr >> 1;
        for &word in data {
            self.words[(index & self.mask) as usize] = word;
            index = index.wrapping_add(1);
        }
    }
}

impl WordMemory for ChipRam {
    fn word_mask(&self) -> u32 {
        self.mask
    }

    fn read_word(&self, index: u32) -> u16 {
        self.words[(index & self.mask) as usize]
    }

    fn write_word(&mut self, index: u32, value: u16) {
        self.words[(index & self.mask) as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sizes_that_are_not_powers_of_two() {
        assert_eq!(ChipRam::new(0), Err(MemoryError::Empty));
        assert_eq!(
            ChipRam::new(3000),
            Err(MemoryError::NotPowerOfTwo { words: 3000 })
        );
        assert!(ChipRam::new(256 * 1024).is_ok());
    }

    #[test]
    fn word_mask_covers_the_array() {
        let ram = ChipRam::new(0x4_0000).unwrap();
        assert_eq!(ram.word_mask(), 0x3_FFFF);
        assert_eq!(ram.len(), 0x4_0000);
    }

    #[test]
    fn byte_addresses_ignore_bit_zero() {
        let mut ram = ChipRam::new(16).unwrap();
        ram.set_word_at(0x0005, 0xBEEF);
        assert_eq!(ram.word_at(0x0004), 0xBEEF);
        assert_eq!(ram.read_word(2), 0xBEEF);
    }

    #[test]
    fn addresses_wrap_at_the_end_of_ram() {
        let mut ram = ChipRam::new(16).unwrap();
        ram.load_words(30, &[0x1111, 0x2222]);
        assert_eq!(ram.read_word(15), 0x1111);
        assert_eq!(ram.read_word(0), 0x2222);
        assert_eq!(ram.word_at(32), 0x2222);
    }
}
