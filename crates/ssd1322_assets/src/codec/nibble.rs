use super::CodecError;

/// Reduces an 8-bit intensity to one of 16 levels by truncation.
pub const fn quantize_level(value: u8) -> u8 {
    value >> 4
}

pub fn quantize(raw: &[u8]) -> Vec<u8> {
    raw.iter().copied().map(quantize_level).collect()
}

pub(crate) fn quantize_in_place(values: &mut [u8]) {
    for value in values {
        *value = quantize_level(*value);
    }
}

/// Merges pixel pairs into bytes, the earlier pixel in the high nibble.
pub fn pack(quantized: &[u8]) -> Result<Vec<u8>, CodecError> {
    if quantized.len() % 2 != 0 {
        return Err(CodecError::LengthMismatch { len: quantized.len() });
    }

    if let Some((index, &value)) = quantized.iter().enumerate().find(|&(_, &value)| value > 0x0F) {
        return Err(CodecError::LevelOutOfRange { index, value });
    }

    Ok(quantized.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

/// Splits packed bytes back into one level per pixel.
pub fn unpack(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().flat_map(|&byte| [byte >> 4, byte & 0x0F]).collect()
}
