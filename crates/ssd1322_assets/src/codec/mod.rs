pub mod grid;
pub mod nibble;
pub mod packed;
pub mod pad;

/// Violations of the packing codec's shape and length rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("declared size {width}x{height} does not match {actual} supplied pixels")]
    ShapeMismatch { width: u32, height: u32, actual: usize },
    #[error("cannot pair {len} nibbles into bytes, the count must be even")]
    LengthMismatch { len: usize },
    #[error("pixel {index} has level {value}, packed levels must be below 16")]
    LevelOutOfRange { index: usize, value: u8 },
    #[error(
        "glyph {character:?} occupies {actual} bytes but its geometry implies {expected}"
    )]
    InvariantViolation { character: char, expected: usize, actual: usize },
    #[error("glyph {0:?} appears more than once")]
    DuplicateGlyph(char),
}
