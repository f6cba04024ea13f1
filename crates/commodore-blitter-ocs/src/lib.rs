//! Commodore Agnus OCS blitter.
//!
//! The blitter moves and combines rectangular blocks of chip RAM, or draws
//! lines, without the CPU. It reads up to three source channels (A, B, C),
//! aligns A and B through barrel shifters, combines the three with an 8-entry
//! minterm truth table, optionally fills between edge bits, and writes the
//! result through channel D.
//!
//! This crate models the blitter as atomic DMA: the host writes registers,
//! then calls [`Blitter::advance_dma`], which performs the entire blit,
//! posts the BLIT interrupt and returns. Slot-level arbitration against other
//! DMA users belongs to the host.

mod blitter;
mod config;
mod error;
pub mod fill;
mod interrupt;
pub mod minterm;

pub use blitter::{Blitter, Channel, LineOctant, STATUS_BBUSY, STATUS_BZERO};
pub use config::{BlitterConfig, PatternedLinePolicy};
pub use error::BlitterError;
pub use fill::FillMode;
pub use interrupt::{InterruptFlag, InterruptLatch, InterruptSink};
pub use minterm::apply_minterm;

pub use emu_core;
