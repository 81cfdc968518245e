use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::codec::{grid::PixelGrid, CodecError};
use crate::AssetError;

/// Coverage bitmap of one character, with its placement against the baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterGlyph {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, 0 is background and 255 full ink.
    pub pixels: Vec<u8>,
    /// Rows from the bitmap top down to the baseline.
    pub ascent: i32,
    /// Rows below the baseline, never negative.
    pub descent: i32,
}

impl RasterGlyph {
    pub fn into_grid(self) -> Result<PixelGrid, CodecError> {
        PixelGrid::new(self.width, self.height, self.pixels)
    }
}

pub trait GlyphRasterizer {
    /// Returns `None` when the font has no glyph for `character`.
    fn rasterize(&self, character: char) -> Option<RasterGlyph>;
}

/// Rasterizes TrueType and OpenType outlines at a fixed pixel size.
pub struct FontdueRasterizer {
    font: Font,
    size: f32,
}

impl FontdueRasterizer {
    pub fn from_path<P: AsRef<Path>>(path: P, size: f32) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&path.display().to_string(), &bytes, size)
    }

    pub fn from_bytes(asset: &str, bytes: &[u8], size: f32) -> Result<Self, AssetError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(AssetError::Font {
                asset: asset.to_owned(),
                reason: format!("invalid pixel size {size}"),
            });
        }

        let settings = FontSettings { scale: size, ..FontSettings::default() };
        let font = Font::from_bytes(bytes, settings)
            .map_err(|reason| AssetError::Font { asset: asset.to_owned(), reason: reason.into() })?;
        Ok(Self { font, size })
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn rasterize(&self, character: char) -> Option<RasterGlyph> {
        if self.font.lookup_glyph_index(character) == 0 {
            return None;
        }

        let (metrics, pixels) = self.font.rasterize(character, self.size);
        let height = metrics.height as i32;
        Some(RasterGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            pixels,
            ascent: height + metrics.ymin,
            descent: (-metrics.ymin).max(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONO: &[u8] = include_bytes!("../../tests/fonts/DejaVuSansMono.ttf");

    fn mono(size: f32) -> FontdueRasterizer {
        FontdueRasterizer::from_bytes("DejaVuSansMono.ttf", MONO, size).unwrap()
    }

    #[test]
    fn baseline_glyph_has_no_descent() {
        let glyph = mono(24.0).rasterize('A').unwrap();

        assert!(glyph.width > 0 && glyph.height > 0);
        assert_eq!(glyph.pixels.len(), (glyph.width * glyph.height) as usize);
        assert_eq!(glyph.descent, 0);
        assert_eq!(glyph.ascent, glyph.height as i32);
    }

    #[test]
    fn descender_hangs_below_baseline() {
        let glyph = mono(24.0).rasterize('g').unwrap();

        assert!(glyph.descent > 0);
        assert!(glyph.ascent > 0);
        assert_eq!(glyph.ascent + glyph.descent, glyph.height as i32);
    }

    #[test]
    fn floating_glyph_sits_above_baseline() {
        // The apostrophe starts well above the baseline, so its ascent exceeds its height.
        let glyph = mono(24.0).rasterize('\'').unwrap();

        assert_eq!(glyph.descent, 0);
        assert!(glyph.ascent > glyph.height as i32);
    }

    #[test]
    fn uncovered_character_is_skipped() {
        assert_eq!(mono(24.0).rasterize('\u{4E2D}'), None);
    }

    #[test]
    fn size_scales_the_bitmap() {
        let small = mono(12.0).rasterize('M').unwrap();
        let large = mono(36.0).rasterize('M').unwrap();

        assert!(large.height > small.height);
        assert!(large.width > small.width);
        assert_eq!(mono(12.0).size(), 12.0);
    }

    #[test]
    fn garbage_font_data_is_reported() {
        let err = FontdueRasterizer::from_bytes("junk.ttf", b"not a font", 12.0).err().unwrap();
        assert!(matches!(err, AssetError::Font { asset, .. } if asset == "junk.ttf"));
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let err = FontdueRasterizer::from_bytes("any.ttf", &[], 0.0).err().unwrap();
        assert!(err.to_string().contains("invalid pixel size"));
    }

    #[test]
    fn raster_converts_to_grid() {
        let glyph =
            RasterGlyph { width: 2, height: 2, pixels: vec![0, 64, 128, 255], ascent: 2, descent: 0 };
        let grid = glyph.into_grid().unwrap();
        assert_eq!(grid.pixels(), &[0, 64, 128, 255]);
    }
}
