use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// An asset set described in TOML.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "bitmap")]
    pub bitmaps: Vec<BitmapEntry>,
    #[serde(default, rename = "font")]
    pub fonts: Vec<FontEntry>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Basename of the generated bitmap `.c`/`.h` pair.
    pub bitmaps: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from("."), bitmaps: String::from("resources") }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BitmapEntry {
    pub path: PathBuf,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FontEntry {
    pub path: PathBuf,
    /// Pixel size the font is rasterized at.
    pub size: f32,
    pub name: Option<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&text, base).with_context(|| format!("invalid manifest {:?}", path))
    }

    /// Parses manifest text, resolving relative paths against `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self> {
        let mut manifest: Manifest = toml::from_str(text)?;

        if manifest.output.directory.is_relative() {
            manifest.output.directory = base.join(&manifest.output.directory);
        }
        for bitmap in &mut manifest.bitmaps {
            bitmap.path = base.join(&bitmap.path);
        }
        for font in &mut manifest.fonts {
            font.path = base.join(&font.path);
            anyhow::ensure!(
                font.size.is_finite() && font.size > 0.0,
                "font {:?} needs a positive size, got {}",
                font.path,
                font.size
            );
        }

        Ok(manifest)
    }
}
