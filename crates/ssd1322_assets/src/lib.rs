mod atlas;
mod codec;
pub mod codegen;
mod source;

use std::path::Path;

use log::{debug, info, warn};

pub use atlas::{
    alphabet::ALPHABET,
    layout::{AtlasLayoutEngine, FontAtlas, Glyph, GlyphInput},
};
pub use codec::{
    grid::{PaddedGrid, PixelGrid},
    nibble::{pack, quantize, quantize_level, unpack},
    packed::PackedBitmap,
    pad::{pad, pad_grid},
    CodecError,
};
pub use source::{
    decode::{grid_from_image, load_grid},
    raster::{FontdueRasterizer, GlyphRasterizer, RasterGlyph},
};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("{asset}: {error}")]
    Codec { asset: String, error: CodecError },
    #[error("{asset}: failed to load font: {reason}")]
    Font { asset: String, reason: String },
    #[error("{0:?} does not yield a C identifier")]
    InvalidName(String),
    #[error("asset name {0:?} is used more than once")]
    DuplicateAsset(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AssetError {
    fn codec(asset: impl Into<String>, error: CodecError) -> Self {
        Self::Codec { asset: asset.into(), error }
    }
}

/// A packed raster ready for emission, together with its padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapAsset {
    pub name: String,
    pub bitmap: PackedBitmap,
    /// Zero columns appended to each row by the padder.
    pub dummy_columns: u32,
}

#[derive(Clone, Debug)]
pub struct FontAsset {
    pub name: String,
    pub atlas: FontAtlas,
}

/// Everything compiled in one invocation, in the order it should be emitted.
#[derive(Clone, Debug, Default)]
pub struct AssetTable {
    bitmaps: Vec<BitmapAsset>,
    fonts: Vec<FontAsset>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bitmaps(&self) -> &[BitmapAsset] {
        &self.bitmaps
    }

    pub fn fonts(&self) -> &[FontAsset] {
        &self.fonts
    }

    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty() && self.fonts.is_empty()
    }

    /// Bitmaps and fonts share one C namespace, so a name may only be taken once across both.
    pub fn contains(&self, name: &str) -> bool {
        self.bitmaps.iter().any(|existing| existing.name == name)
            || self.fonts.iter().any(|existing| existing.name == name)
    }

    pub fn insert_bitmap(&mut self, asset: BitmapAsset) -> Result<(), AssetError> {
        if self.contains(&asset.name) {
            return Err(AssetError::DuplicateAsset(asset.name));
        }
        self.bitmaps.push(asset);
        Ok(())
    }

    pub fn insert_font(&mut self, asset: FontAsset) -> Result<(), AssetError> {
        if self.contains(&asset.name) {
            return Err(AssetError::DuplicateAsset(asset.name));
        }
        self.fonts.push(asset);
        Ok(())
    }
}

/// Runs the bitmap and font pipelines.
#[derive(Default)]
pub struct AssetCompiler {
    engine: AtlasLayoutEngine,
}

impl AssetCompiler {
    /// Compiles an image file. Without a `name` the identifier comes from the file name.
    pub fn compile_bitmap_path<P: AsRef<Path>>(
        &self,
        path: P,
        name: Option<&str>,
    ) -> Result<BitmapAsset, AssetError> {
        let path = path.as_ref();
        let name = resolve_name(path, name)?;
        let grid = load_grid(path)?;
        self.compile_bitmap(name, grid)
    }

    /// Quantizes, pads and packs one raster of 8-bit intensities.
    pub fn compile_bitmap(
        &self,
        name: impl Into<String>,
        grid: PixelGrid,
    ) -> Result<BitmapAsset, AssetError> {
        let name = name.into();
        let (width, height) = (grid.width(), grid.height());

        let padded = pad_grid(&grid.quantized());
        let dummy_columns = padded.dummy_columns();
        let bitmap =
            PackedBitmap::from_padded(&padded).map_err(|err| AssetError::codec(&name, err))?;

        debug!(
            "bitmap {name}: {width}x{height} px, {dummy_columns} dummy columns, {} bytes",
            bitmap.bytes().len()
        );

        Ok(BitmapAsset { name, bitmap, dummy_columns })
    }

    pub fn compile_font_path<P: AsRef<Path>>(
        &self,
        path: P,
        size: f32,
        name: Option<&str>,
    ) -> Result<FontAsset, AssetError> {
        let path = path.as_ref();
        let name = resolve_name(path, name)?;
        let rasterizer = FontdueRasterizer::from_path(path, size)?;
        self.compile_font(name, &rasterizer)
    }

    /// Rasterizes every character of [`ALPHABET`] and lays the glyphs out in one atlas.
    ///
    /// Characters the rasterizer does not cover are skipped and take no atlas space.
    pub fn compile_font<R: GlyphRasterizer + ?Sized>(
        &self,
        name: impl Into<String>,
        rasterizer: &R,
    ) -> Result<FontAsset, AssetError> {
        let name = name.into();
        let mut inputs = Vec::with_capacity(ALPHABET.len());

        for character in ALPHABET.chars() {
            let Some(raster) = rasterizer.rasterize(character) else {
                warn!("font {name} has no glyph for {character:?}, skipping");
                continue;
            };

            let glyph_asset = || format!("{name} glyph {character:?}");
            let ascent = raster.ascent;
            let descent = raster.descent;
            let grid = raster.into_grid().map_err(|err| AssetError::codec(glyph_asset(), err))?;
            let padded = pad_grid(&grid.quantized());
            let bitmap = PackedBitmap::from_padded(&padded)
                .map_err(|err| AssetError::codec(glyph_asset(), err))?;

            inputs.push(GlyphInput {
                character,
                bitmap,
                ascent,
                descent,
                dummy_columns: padded.dummy_columns(),
            });
        }

        let atlas = self.engine.layout(inputs).map_err(|err| AssetError::codec(&name, err))?;
        info!(
            "font {name}: {} glyphs, height {}, descent {}, {} bytes",
            atlas.len(),
            atlas.font_height(),
            atlas.font_descent(),
            atlas.bytes().len()
        );

        Ok(FontAsset { name, atlas })
    }
}

/// Identifier derived from a file name, see [`codegen::sanitize`].
pub fn asset_name(path: &Path) -> Result<String, AssetError> {
    let file_name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    identifier(&file_name)
}

/// Sanitizes `name` and fails unless the result is a usable C identifier.
pub fn identifier(name: &str) -> Result<String, AssetError> {
    let sanitized = codegen::sanitize(name);
    if !codegen::is_identifier(&sanitized) {
        return Err(AssetError::InvalidName(name.to_owned()));
    }
    Ok(sanitized)
}

fn resolve_name(path: &Path, name: Option<&str>) -> Result<String, AssetError> {
    match name {
        Some(name) => identifier(name),
        None => asset_name(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Draws a solid block per character, sized by its position in the alphabet.
    struct BlockRasterizer {
        covered: &'static str,
    }

    impl GlyphRasterizer for BlockRasterizer {
        fn rasterize(&self, character: char) -> Option<RasterGlyph> {
            let index = self.covered.find(character)? as u32;
            let width = 5 + index;
            let height = 8;
            Some(RasterGlyph {
                width,
                height,
                pixels: vec![0xFF; (width * height) as usize],
                ascent: 6,
                descent: 2 + index as i32,
            })
        }
    }

    #[test]
    fn bitmap_pipeline_pads_and_packs() {
        let compiler = AssetCompiler::default();
        let grid = PixelGrid::new(5, 3, vec![0; 15]).unwrap();
        let asset = compiler.compile_bitmap("blank", grid).unwrap();

        assert_eq!(asset.dummy_columns, 3);
        assert_eq!(asset.bitmap.packed_width(), 2);
        assert_eq!(asset.bitmap.height(), 3);
        assert_eq!(asset.bitmap.bytes(), &[0u8; 12][..]);
    }

    #[test]
    fn bitmap_pipeline_quantizes_before_packing() {
        let compiler = AssetCompiler::default();
        let grid = PixelGrid::new(4, 1, vec![0xFF, 0x0F, 0xF0, 0x10]).unwrap();
        let asset = compiler.compile_bitmap("row", grid).unwrap();

        assert_eq!(asset.dummy_columns, 0);
        assert_eq!(asset.bitmap.bytes(), &[0xF0, 0xF1]);
    }

    #[test]
    fn font_pipeline_skips_uncovered_characters() {
        let compiler = AssetCompiler::default();
        let rasterizer = BlockRasterizer { covered: "AB" };
        let font = compiler.compile_font("blocks", &rasterizer).unwrap();
        let atlas = &font.atlas;

        assert_eq!(atlas.len(), 2);
        let a = atlas.glyph('A').unwrap();
        let b = atlas.glyph('B').unwrap();

        // 5 px pads to 8: 2 column units, 4 bytes per row, 8 rows.
        assert_eq!(a.atlas_offset, 0);
        assert_eq!(a.dummy_columns, 3);
        assert_eq!(a.bitmap.bytes().len(), 32);
        assert_eq!(b.atlas_offset, 32);
        assert_eq!(b.dummy_columns, 2);
        assert_eq!(atlas.font_height(), 8);
        assert_eq!(atlas.font_descent(), 3);
        assert_eq!(atlas.bytes().len(), 64);
    }

    #[test]
    fn font_pipeline_names_failing_glyph() {
        struct Broken;

        impl GlyphRasterizer for Broken {
            fn rasterize(&self, character: char) -> Option<RasterGlyph> {
                (character == 'x').then(|| RasterGlyph {
                    width: 4,
                    height: 3,
                    pixels: vec![0; 11],
                    ascent: 3,
                    descent: 0,
                })
            }
        }

        let err = AssetCompiler::default().compile_font("broken", &Broken).unwrap_err();
        match err {
            AssetError::Codec { asset, error } => {
                assert_eq!(asset, "broken glyph 'x'");
                assert!(matches!(error, CodecError::ShapeMismatch { actual: 11, .. }));
            },
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn asset_names_come_from_file_names() {
        assert_eq!(asset_name(Path::new("assets/01ok.bmp")).unwrap(), "ok");
        assert_eq!(asset_name(Path::new("Lato-Regular.ttf")).unwrap(), "Lato_Regular");
        let err = asset_name(Path::new("123.bmp")).unwrap_err();
        assert!(matches!(err, AssetError::InvalidName(name) if name == "123.bmp"));
    }

    #[test]
    fn asset_names_are_valid_c_identifiers() {
        assert_eq!(asset_name(Path::new("my icon.bmp")).unwrap(), "my_icon");
        assert_eq!(identifier("status-icon").unwrap(), "status_icon");
        assert!(matches!(identifier("42"), Err(AssetError::InvalidName(name)) if name == "42"));
    }

    #[test]
    fn explicit_name_replaces_unusable_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("123.png");
        image::GrayImage::from_pixel(4, 2, image::Luma([0xFF])).save(&path).unwrap();
        let compiler = AssetCompiler::default();

        assert!(matches!(
            compiler.compile_bitmap_path(&path, None),
            Err(AssetError::InvalidName(_))
        ));
        let asset = compiler.compile_bitmap_path(&path, Some("digits")).unwrap();
        assert_eq!(asset.name, "digits");
        assert_eq!(asset.bitmap.bytes(), &[0xFF; 4]);
    }

    #[test]
    fn explicit_font_name_is_sanitized_before_loading() {
        let compiler = AssetCompiler::default();
        let missing = Path::new("does/not/exist/123.ttf");

        assert!(matches!(
            compiler.compile_font_path(missing, 12.0, Some("9")),
            Err(AssetError::InvalidName(_))
        ));
        assert!(matches!(
            compiler.compile_font_path(missing, 12.0, Some("tiny font")),
            Err(AssetError::Io(_))
        ));
    }

    #[test]
    fn table_rejects_duplicate_names() {
        let compiler = AssetCompiler::default();
        let mut table = AssetTable::new();
        let first = compiler.compile_bitmap("ok", PixelGrid::new(1, 1, vec![0]).unwrap()).unwrap();
        let second = first.clone();

        table.insert_bitmap(first).unwrap();
        let err = table.insert_bitmap(second).unwrap_err();
        assert!(matches!(err, AssetError::DuplicateAsset(name) if name == "ok"));
        assert_eq!(table.bitmaps().len(), 1);
    }

    #[test]
    fn bitmaps_and_fonts_share_one_namespace() {
        let compiler = AssetCompiler::default();
        let rasterizer = BlockRasterizer { covered: "A" };
        let mut table = AssetTable::new();

        let bitmap = compiler.compile_bitmap("ok", PixelGrid::new(1, 1, vec![0]).unwrap()).unwrap();
        table.insert_bitmap(bitmap).unwrap();
        let font = compiler.compile_font("ok", &rasterizer).unwrap();
        let err = table.insert_font(font).unwrap_err();
        assert!(matches!(err, AssetError::DuplicateAsset(name) if name == "ok"));

        let mut table = AssetTable::new();
        table.insert_font(compiler.compile_font("lato", &rasterizer).unwrap()).unwrap();
        let bitmap =
            compiler.compile_bitmap("lato", PixelGrid::new(1, 1, vec![0]).unwrap()).unwrap();
        assert!(matches!(table.insert_bitmap(bitmap), Err(AssetError::DuplicateAsset(_))));
        assert!(table.contains("lato"));
        assert!(!table.contains("ok"));
    }
}
