use std::collections::BTreeMap;

use crate::codec::{packed::PackedBitmap, CodecError};

/// One packed glyph handed to the layout engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphInput {
    pub character: char,
    pub bitmap: PackedBitmap,
    /// Rows above the baseline.
    pub ascent: i32,
    /// Rows below the baseline.
    pub descent: i32,
    pub dummy_columns: u32,
}

/// A glyph placed in the font buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub character: char,
    pub bitmap: PackedBitmap,
    pub ascent: i32,
    pub dummy_columns: u32,
    /// Byte offset of the glyph's first byte in [`FontAtlas::bytes`].
    pub atlas_offset: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontAtlas {
    glyphs: BTreeMap<char, Glyph>,
    font_height: u32,
    font_descent: i32,
    bytes: Vec<u8>,
}

impl FontAtlas {
    pub fn glyph(&self, character: char) -> Option<&Glyph> {
        self.glyphs.get(&character)
    }

    /// Glyphs in increasing character order, which is also buffer order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn font_height(&self) -> u32 {
        self.font_height
    }

    pub fn font_descent(&self) -> i32 {
        self.font_descent
    }

    /// Every glyph's packed bytes, concatenated.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn glyph_bytes(&self, glyph: &Glyph) -> &[u8] {
        &self.bytes[glyph.atlas_offset..glyph.atlas_offset + glyph.bitmap.bytes().len()]
    }
}

/// Assigns every glyph a contiguous range of the shared font buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct AtlasLayoutEngine;

impl AtlasLayoutEngine {
    pub fn layout(&self, mut glyphs: Vec<GlyphInput>) -> Result<FontAtlas, CodecError> {
        glyphs.sort_by_key(|glyph| glyph.character);
        if let Some(pair) = glyphs.windows(2).find(|pair| pair[0].character == pair[1].character) {
            return Err(CodecError::DuplicateGlyph(pair[0].character));
        }

        let mut atlas = FontAtlas::default();
        let mut cursor = 0;

        for input in glyphs {
            let bitmap = input.bitmap;
            let expected = bitmap.packed_width() as usize * 2 * bitmap.height() as usize;
            let actual = bitmap.bytes().len();
            if expected != actual {
                return Err(CodecError::InvariantViolation {
                    character: input.character,
                    expected,
                    actual,
                });
            }

            atlas.font_height = atlas.font_height.max(bitmap.height());
            atlas.font_descent = atlas.font_descent.max(input.descent);
            atlas.bytes.extend_from_slice(bitmap.bytes());

            atlas.glyphs.insert(input.character, Glyph {
                character: input.character,
                bitmap,
                ascent: input.ascent,
                dummy_columns: input.dummy_columns,
                atlas_offset: cursor,
            });
            cursor += expected;
        }

        Ok(atlas)
    }
}
