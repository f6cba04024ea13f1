//! Configuration for the blitter crate.

/// What to do when line mode is started with a texture in BLTBDAT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternedLinePolicy {
    /// Refuse the blit with [`BlitterError::PatternedLine`](crate::BlitterError).
    #[default]
    Reject,
    /// Log a warning and feed the latched B word to every plotted pixel,
    /// without rotating it.
    UseLatchedPattern,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlitterConfig {
    pub patterned_lines: PatternedLinePolicy,
}
