//! Blitter register file, status and transfer dispatch.
//!
//! Register writes only decode bit fields. A blit is started by writing
//! BLTSIZE and then runs to completion, atomically, on the next call to
//! [`Blitter::advance_dma`].

mod area;
mod line;

use emu_core::{Observable, Value, WordMemory};
use log::{debug, trace, warn};

use crate::config::{BlitterConfig, PatternedLinePolicy};
use crate::error::BlitterError;
use crate::fill::FillMode;
use crate::interrupt::{InterruptFlag, InterruptSink};

/// DMACONR bit 13: the last blit produced only zero words.
pub const STATUS_BZERO: u16 = 0x2000;
/// DMACONR bit 14: a blit is pending or in progress.
pub const STATUS_BBUSY: u16 = 0x4000;

/// Blitter DMA channel.
///
/// A, B and C are sources; D is the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    A,
    B,
    C,
    D,
}

impl Channel {
    const fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
            Channel::C => 2,
            Channel::D => 3,
        }
    }
}

/// Line-mode octant, decoded from BLTCON1 bits 2-4.
///
/// Code bit 2 (SUD) selects an x-major line, bit 0 (AUL) makes the major
/// step go left/up and bit 1 (SUL) does the same for the minor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOctant {
    /// Step along x on every pixel; otherwise along y.
    pub x_major: bool,
    /// Major steps go left/up.
    pub major_negative: bool,
    /// Minor steps go left/up.
    pub minor_negative: bool,
}

impl LineOctant {
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self {
            x_major: code & 4 != 0,
            major_negative: code & 1 != 0,
            minor_negative: code & 2 != 0,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        ((self.x_major as u8) << 2) | ((self.minor_negative as u8) << 1) | self.major_negative as u8
    }
}

#[derive(Debug, Clone)]
pub struct Blitter {
    config: BlitterConfig,

    // BLTCON1
    line_mode: bool,
    one_dot: bool,
    line_direction: u8,
    line_sign: i32,
    exclusive_fill: bool,
    inclusive_fill: bool,
    fill_carry: bool,

    // BLTCON0
    minterms: u8,
    channel_enables: [bool; 4],

    // ASH, BSH
    shifts: [u8; 2],
    // BLTAFWM, BLTALWM
    a_mask: [u16; 2],

    // BLTSIZE; a non-zero height means a blit is pending.
    width: u16,
    height: u16,

    // Word addresses and word modulos, indexed by channel.
    pointers: [u32; 4],
    modulos: [i32; 4],

    a_data: u16,
    b_data: u16,
    c_data: u16,

    not_zero: bool,
}

impl Blitter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BlitterConfig::default())
    }

    #[must_use]
    pub fn with_config(config: BlitterConfig) -> Self {
        Self {
            config,
            line_mode: false,
            one_dot: false,
            line_direction: 0,
            line_sign: 1,
            exclusive_fill: false,
            inclusive_fill: false,
            fill_carry: false,
            minterms: 0,
            channel_enables: [false; 4],
            shifts: [0; 2],
            a_mask: [0; 2],
            width: 0,
            height: 0,
            pointers: [0; 4],
            modulos: [0; 4],
            a_data: 0,
            b_data: 0,
            c_data: 0,
            not_zero: false,
        }
    }

    #[must_use]
    pub const fn config(&self) -> BlitterConfig {
        self.config
    }

    // Register writes

    /// BLTCON0: ASH3-0, USEA-D, LF7-0.
    pub fn set_bltcon0(&mut self, value: u16) {
        self.minterms = value as u8;
        self.channel_enables[3] = value & 0x0100 != 0;
        self.channel_enables[2] = value & 0x0200 != 0;
        self.channel_enables[1] = value & 0x0400 != 0;
        self.channel_enables[0] = value & 0x0800 != 0;
        self.shifts[0] = (value >> 12) as u8;
        debug!(target: "blitter", "BLTCON0 = ${value:04X}");
    }

    /// BLTCON1: BSH3-0, SIGN, EFE/SUD, IFE/SUL, FCI/AUL, DESC/SING, LINE.
    pub fn set_bltcon1(&mut self, value: u16) {
        self.line_mode = value & 0x0001 != 0;
        self.one_dot = value & 0x0002 != 0;
        self.line_direction = ((value >> 2) & 7) as u8;
        self.line_sign = if value & 0x0040 != 0 { -1 } else { 1 };

        // EFE wins if both fill bits are set.
        self.exclusive_fill = value & 0x0010 != 0;
        self.inclusive_fill = !self.exclusive_fill && value & 0x0008 != 0;
        self.fill_carry = value & 0x0004 != 0;
        self.shifts[1] = (value >> 12) as u8;
        debug!(target: "blitter", "BLTCON1 = ${value:04X}");
    }

    /// BLTCON0L: rewrite the minterms without touching shift or enables.
    pub fn set_minterms(&mut self, value: u16) {
        self.minterms = value as u8;
        debug!(target: "blitter", "BLTCON0L = ${value:04X}");
    }

    /// BLTAFWM.
    pub fn set_first_word_mask(&mut self, value: u16) {
        self.a_mask[0] = value;
        debug!(target: "blitter", "BLTAFWM = ${value:04X}");
    }

    /// BLTALWM.
    pub fn set_last_word_mask(&mut self, value: u16) {
        self.a_mask[1] = value;
        debug!(target: "blitter", "BLTALWM = ${value:04X}");
    }

    /// BLTSIZE: height in bits 6-15, width in words in bits 0-5. Zero in
    /// either field means the maximum (1024 rows, 64 words).
    ///
    /// Writing BLTSIZE arms the blitter.
    pub fn set_size(&mut self, value: u16) {
        self.width = value & 0x3F;
        if self.width == 0 {
            self.width = 64;
        }
        self.height = value >> 6;
        if self.height == 0 {
            self.height = 1024;
        }
        debug!(
            target: "blitter",
            "BLTSIZE = ${value:04X} ({} x {})",
            self.width,
            self.height
        );
    }

    /// BLTxDAT. Writes to D are ignored; D has no data latch.
    pub fn set_data(&mut self, channel: Channel, value: u16) {
        match channel {
            Channel::A => self.a_data = value,
            Channel::B => self.b_data = value,
            Channel::C => self.c_data = value,
            Channel::D => {
                trace!(target: "blitter", "ignored write to BLTDDAT");
                return;
            }
        }
        debug!(target: "blitter", "BLT{channel:?}DAT = ${value:04X}");
    }

    /// BLTxPTH: bits 16 and up of the channel's byte address.
    pub fn set_pointer_high(&mut self, channel: Channel, value: u16) {
        let pointer = &mut self.pointers[channel.index()];
        *pointer = (*pointer & 0x7FFF) | (u32::from(value) << 15);
        debug!(target: "blitter", "BLT{channel:?}PTH = ${value:04X}");
    }

    /// BLTxPTL: bits 0-15 of the channel's byte address. Bit 0 is ignored.
    pub fn set_pointer_low(&mut self, channel: Channel, value: u16) {
        let pointer = &mut self.pointers[channel.index()];
        *pointer = (*pointer & !0x7FFF) | u32::from(value >> 1);
        debug!(target: "blitter", "BLT{channel:?}PTL = ${value:04X}");
    }

    /// Write both halves of a channel pointer from a byte address.
    pub fn set_pointer(&mut self, channel: Channel, addr: u32) {
        self.set_pointer_high(channel, (addr >> 16) as u16);
        self.set_pointer_low(channel, addr as u16);
    }

    /// BLTxMOD: signed byte modulo added at the end of every row. Bit 0 is
    /// ignored.
    pub fn set_modulo(&mut self, channel: Channel, value: u16) {
        self.modulos[channel.index()] = i32::from(value as i16) >> 1;
        debug!(target: "blitter", "BLT{channel:?}MOD = ${value:04X}");
    }

    // Register reads

    /// DMACONR blitter bits: [`STATUS_BZERO`] and [`STATUS_BBUSY`].
    #[must_use]
    pub fn status(&self) -> u16 {
        let result = (if self.not_zero { 0 } else { STATUS_BZERO })
            | (if self.height != 0 { STATUS_BBUSY } else { 0 });
        trace!(target: "blitter", "status ${result:04X}");
        result
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.height != 0
    }

    /// BZERO as a flag: true when no output word of the last blit was
    /// non-zero.
    #[must_use]
    pub const fn result_was_zero(&self) -> bool {
        !self.not_zero
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Rows (area mode) or pixels (line mode) still to run; zero when idle.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub const fn minterms(&self) -> u8 {
        self.minterms
    }

    #[must_use]
    pub const fn channel_enabled(&self, channel: Channel) -> bool {
        self.channel_enables[channel.index()]
    }

    /// Barrel shift for A or B. Other channels have no shifter and report 0.
    #[must_use]
    pub const fn shift(&self, channel: Channel) -> u8 {
        match channel {
            Channel::A => self.shifts[0],
            Channel::B => self.shifts[1],
            Channel::C | Channel::D => 0,
        }
    }

    #[must_use]
    pub const fn first_word_mask(&self) -> u16 {
        self.a_mask[0]
    }

    #[must_use]
    pub const fn last_word_mask(&self) -> u16 {
        self.a_mask[1]
    }

    /// Current word address of a channel.
    #[must_use]
    pub const fn pointer(&self, channel: Channel) -> u32 {
        self.pointers[channel.index()]
    }

    /// Current byte address of a channel, as BLTxPT would read.
    #[must_use]
    pub const fn pointer_address(&self, channel: Channel) -> u32 {
        self.pointers[channel.index()] << 1
    }

    /// Row modulo of a channel, in words.
    #[must_use]
    pub const fn modulo(&self, channel: Channel) -> i32 {
        self.modulos[channel.index()]
    }

    /// Data latch of a source channel. D has none and reads as 0.
    #[must_use]
    pub const fn data(&self, channel: Channel) -> u16 {
        match channel {
            Channel::A => self.a_data,
            Channel::B => self.b_data,
            Channel::C => self.c_data,
            Channel::D => 0,
        }
    }

    #[must_use]
    pub const fn line_mode(&self) -> bool {
        self.line_mode
    }

    #[must_use]
    pub const fn line_octant(&self) -> LineOctant {
        LineOctant::from_code(self.line_direction)
    }

    /// SIGN: sign of the initial line error term, as +1 or -1.
    #[must_use]
    pub const fn line_sign(&self) -> i32 {
        self.line_sign
    }

    /// DESC, the area-mode reading of BLTCON1 bit 1: pointers count down
    /// and the barrel shifter rotates left.
    #[must_use]
    pub const fn descending_address_mode(&self) -> bool {
        self.one_dot && !self.line_mode
    }

    /// SING, the line-mode reading of BLTCON1 bit 1: plot one pixel per
    /// row of the line.
    #[must_use]
    pub const fn single_dot_per_major_step(&self) -> bool {
        self.one_dot && self.line_mode
    }

    /// Pointer increment per word: -1 in descending mode, otherwise +1.
    #[must_use]
    pub const fn direction(&self) -> i32 {
        if self.descending_address_mode() { -1 } else { 1 }
    }

    #[must_use]
    pub const fn fill_mode(&self) -> Option<FillMode> {
        if self.exclusive_fill {
            Some(FillMode::Exclusive)
        } else if self.inclusive_fill {
            Some(FillMode::Inclusive)
        } else {
            None
        }
    }

    /// FCI: fill carry seeded at the start of every row.
    #[must_use]
    pub const fn fill_carry(&self) -> bool {
        self.fill_carry
    }

    // Execution

    /// Run the pending blit to completion.
    ///
    /// Returns `Ok(false)` when the blitter is idle. Otherwise performs the
    /// whole area or line operation against `memory`, posts
    /// [`InterruptFlag::Blitter`], clears the busy state and returns
    /// `Ok(true)`.
    pub fn advance_dma<M, I>(
        &mut self,
        memory: &mut M,
        interrupts: &mut I,
    ) -> Result<bool, BlitterError>
    where
        M: WordMemory + ?Sized,
        I: InterruptSink + ?Sized,
    {
        if self.height == 0 {
            return Ok(false);
        }

        if self.line_mode && self.b_data != 0xFFFF {
            match self.config.patterned_lines {
                PatternedLinePolicy::Reject => {
                    warn!(
                        target: "blitter",
                        "refusing patterned line (BLTBDAT=${:04X})",
                        self.b_data
                    );
                    return Err(BlitterError::PatternedLine {
                        pattern: self.b_data,
                    });
                }
                PatternedLinePolicy::UseLatchedPattern => {
                    warn!(
                        target: "blitter",
                        "patterned line drawn with unrotated BLTBDAT=${:04X}",
                        self.b_data
                    );
                }
            }
        }

        self.not_zero = false;
        if self.line_mode {
            trace!(
                target: "blitter",
                "line: {} pixels, octant {:03b}, D=${:06X}",
                self.height,
                self.line_direction,
                self.pointer_address(Channel::D)
            );
            self.run_line(memory);
        } else {
            trace!(
                target: "blitter",
                "area: {} x {}, LF=${:02X}, D=${:06X}",
                self.width,
                self.height,
                self.minterms,
                self.pointer_address(Channel::D)
            );
            self.run_area(memory);
        }

        interrupts.post_interrupt(InterruptFlag::Blitter);
        self.height = 0;
        debug!(target: "blitter", "blit complete, zero={}", !self.not_zero);

        Ok(true)
    }
}

impl Default for Blitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Observable for Blitter {
    fn query(&self, path: &str) -> Option<Value> {
        let value: Value = match path {
            "busy" => self.is_busy().into(),
            "zero" => self.result_was_zero().into(),
            "bltcon.line" => self.line_mode.into(),
            "bltcon.one_dot" => self.one_dot.into(),
            "bltcon.octant" => self.line_direction.into(),
            "bltcon.sign" => self.line_sign.into(),
            "bltcon.fci" => self.fill_carry.into(),
            "bltcon.ife" => self.inclusive_fill.into(),
            "bltcon.efe" => self.exclusive_fill.into(),
            "bltcon.lf" => self.minterms.into(),
            "bltcon.use_a" => self.channel_enables[0].into(),
            "bltcon.use_b" => self.channel_enables[1].into(),
            "bltcon.use_c" => self.channel_enables[2].into(),
            "bltcon.use_d" => self.channel_enables[3].into(),
            "bltcon.ash" => self.shifts[0].into(),
            "bltcon.bsh" => self.shifts[1].into(),
            "bltafwm" => self.a_mask[0].into(),
            "bltalwm" => self.a_mask[1].into(),
            "bltsize.width" => self.width.into(),
            "bltsize.height" => self.height.into(),
            "bltapt" => self.pointer_address(Channel::A).into(),
            "bltbpt" => self.pointer_address(Channel::B).into(),
            "bltcpt" => self.pointer_address(Channel::C).into(),
            "bltdpt" => self.pointer_address(Channel::D).into(),
            "bltamod" => (self.modulos[0] * 2).into(),
            "bltbmod" => (self.modulos[1] * 2).into(),
            "bltcmod" => (self.modulos[2] * 2).into(),
            "bltdmod" => (self.modulos[3] * 2).into(),
            "bltadat" => self.a_data.into(),
            "bltbdat" => self.b_data.into(),
            "bltcdat" => self.c_data.into(),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "busy",
            "zero",
            "bltcon.line",
            "bltcon.one_dot",
            "bltcon.octant",
            "bltcon.sign",
            "bltcon.fci",
            "bltcon.ife",
            "bltcon.efe",
            "bltcon.lf",
            "bltcon.use_a",
            "bltcon.use_b",
            "bltcon.use_c",
            "bltcon.use_d",
            "bltcon.ash",
            "bltcon.bsh",
            "bltafwm",
            "bltalwm",
            "bltsize.width",
            "bltsize.height",
            "bltapt",
            "bltbpt",
            "bltcpt",
            "bltdpt",
            "bltamod",
            "bltbmod",
            "bltcmod",
            "bltdmod",
            "bltadat",
            "bltbdat",
            "bltcdat",
        ]
    }
}
