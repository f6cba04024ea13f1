//! Core traits and types shared by emulated chips.
//!
//! DMA-capable chips see memory as an array of 16-bit words and expose their
//! internal state for inspection. Both concerns live here so that chip crates
//! stay independent of any particular machine.

mod memory;
mod observable;

pub use memory::{ChipRam, MemoryError, WordMemory};
pub use observable::{Observable, Value};
