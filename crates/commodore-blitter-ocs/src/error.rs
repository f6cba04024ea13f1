use thiserror::Error;

/// Configurations the blitter refuses to run.
///
/// Register values are never validated; hardware accepts anything. The one
/// exception is a feature path that is not emulated, where running anyway
/// would silently diverge from real output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlitterError {
    /// Line mode with a texture in BLTBDAT. Only solid lines ($FFFF) are
    /// emulated. The blit is left pending and memory is untouched.
    #[error("patterned line blits are not emulated (BLTBDAT=${pattern:04X})")]
    PatternedLine { pattern: u16 },
}
