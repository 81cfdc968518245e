use super::{nibble, CodecError};

/// One unpacked raster, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelGrid {
    /// Fails unless both dimensions are non-zero and `pixels` holds exactly `width * height`
    /// values.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CodecError> {
        let expected = width as usize * height as usize;
        if expected == 0 || pixels.len() != expected {
            return Err(CodecError::ShapeMismatch { width, height, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pixels.chunks(self.width as usize)
    }

    /// Drops every intensity from 8 to 4 bits.
    pub fn quantized(mut self) -> Self {
        nibble::quantize_in_place(&mut self.pixels);
        self
    }
}

/// A raster whose rows were right-padded with zeros to a multiple of four pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedGrid {
    width: u32,
    padded_width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PaddedGrid {
    pub(crate) fn new(width: u32, padded_width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(padded_width % 4, 0);
        debug_assert_eq!(pixels.len(), padded_width as usize * height as usize);
        Self { width, padded_width, height, pixels }
    }

    /// Width before padding.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn padded_width(&self) -> u32 {
        self.padded_width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dummy_columns(&self) -> u32 {
        self.padded_width - self.width
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pixels.chunks(self.padded_width as usize)
    }
}
