//! Interrupt delivery to the host.
//!
//! The blitter raises exactly one interrupt source (BLIT, INTREQ bit 6). The
//! full INTREQ bit map is modelled so that a host can route the flag straight
//! into its own interrupt controller.

/// Paula INTREQ/INTENA sources, by bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterruptFlag {
    SerialTransmit,
    DiskBlock,
    Software,
    Ports,
    Copper,
    VerticalBlank,
    Blitter,
    Audio0,
    Audio1,
    Audio2,
    Audio3,
    SerialReceive,
    DiskSync,
    External,
}

impl InterruptFlag {
    /// Bit position in INTREQ.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            InterruptFlag::SerialTransmit => 0,
            InterruptFlag::DiskBlock => 1,
            InterruptFlag::Software => 2,
            InterruptFlag::Ports => 3,
            InterruptFlag::Copper => 4,
            InterruptFlag::VerticalBlank => 5,
            InterruptFlag::Blitter => 6,
            InterruptFlag::Audio0 => 7,
            InterruptFlag::Audio1 => 8,
            InterruptFlag::Audio2 => 9,
            InterruptFlag::Audio3 => 10,
            InterruptFlag::SerialReceive => 11,
            InterruptFlag::DiskSync => 12,
            InterruptFlag::External => 13,
        }
    }

    /// INTREQ mask for this source.
    #[must_use]
    pub const fn mask(self) -> u16 {
        1 << self.bit()
    }
}

/// Receiver for interrupt requests. Fire-and-forget.
pub trait InterruptSink {
    fn post_interrupt(&mut self, flag: InterruptFlag);
}

/// Pending-interrupt latch with INTREQ semantics.
///
/// Enough of an interrupt controller for hosts that only need to know which
/// sources have fired since the last acknowledge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterruptLatch {
    pub intreq: u16,
}

impl InterruptLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self { intreq: 0 }
    }

    #[must_use]
    pub const fn is_pending(&self, flag: InterruptFlag) -> bool {
        self.intreq & flag.mask() != 0
    }

    /// Clear a pending source, as a CPU write of the bit to INTREQ would.
    pub fn acknowledge(&mut self, flag: InterruptFlag) {
        self.intreq &= !flag.mask();
    }

    /// SET/CLR-style write: bit 15 selects whether the other bits are set or
    /// cleared.
    pub fn write_intreq(&mut self, val: u16) {
        if val & 0x8000 != 0 {
            self.intreq |= val & 0x7FFF;
        } else {
            self.intreq &= !(val & 0x7FFF);
        }
    }
}

impl InterruptSink for InterruptLatch {
    fn post_interrupt(&mut self, flag: InterruptFlag) {
        self.intreq |= flag.mask();
    }
}
