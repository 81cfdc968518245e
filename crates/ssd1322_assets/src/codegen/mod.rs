//! C source and header emission for compiled assets.
//!
//! The generated code targets an SSD1322 driver that declares `bitmap_t`, `font_t` and
//! `font_table_entry_t` in `ssd1322.h`.

mod bitmap;
mod font;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

pub use bitmap::{write_bitmap_header, write_bitmap_source};
pub use font::{write_font_header, write_font_source};

use crate::{BitmapAsset, FontAsset};

/// Turns a file name into a C identifier: the extension and leading digits are dropped and
/// every character outside `[A-Za-z0-9_]` becomes `_`.
pub fn sanitize(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or_default();
    stem.trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Whether `name` can be used verbatim as a C identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        },
        _ => false,
    }
}

pub fn hex_byte(value: u8) -> String {
    format!("0x{value:02X}")
}

pub fn hex_word(value: usize) -> String {
    format!("0x{value:04X}")
}

/// Two-digit hex with a leading minus for negative values.
pub fn hex_signed(value: i32) -> String {
    if value < 0 {
        format!("-0x{:02X}", value.unsigned_abs())
    } else {
        format!("0x{value:02X}")
    }
}

/// Paths of one generated `.h`/`.c` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub header: PathBuf,
    pub source: PathBuf,
}

impl GeneratedFiles {
    fn new(dir: &Path, basename: &str) -> Self {
        Self {
            header: dir.join(format!("{basename}.h")),
            source: dir.join(format!("{basename}.c")),
        }
    }
}

/// Writes `<basename>.h` and `<basename>.c` for a set of bitmaps into `dir`.
pub fn write_bitmap_files(
    dir: &Path,
    basename: &str,
    bitmaps: &[BitmapAsset],
) -> io::Result<GeneratedFiles> {
    let mut header = Vec::new();
    write_bitmap_header(&mut header, basename, bitmaps)?;
    let mut source = Vec::new();
    write_bitmap_source(&mut source, basename, bitmaps)?;

    let files = GeneratedFiles::new(dir, basename);
    write_pair(dir, &files, &header, &source)?;
    Ok(files)
}

/// Writes `<name>.h` and `<name>.c` for one font into `dir`.
pub fn write_font_files(dir: &Path, font: &FontAsset) -> io::Result<GeneratedFiles> {
    let mut header = Vec::new();
    write_font_header(&mut header, font)?;
    let mut source = Vec::new();
    write_font_source(&mut source, font)?;

    let files = GeneratedFiles::new(dir, &font.name);
    write_pair(dir, &files, &header, &source)?;
    Ok(files)
}

/// Stages both files next to their targets and only then moves them into place, so a failed
/// write never leaves a half-written source or a header without its source.
fn write_pair(dir: &Path, files: &GeneratedFiles, header: &[u8], source: &[u8]) -> io::Result<()> {
    let staged_source = stage(dir, source)?;
    let staged_header = stage(dir, header)?;
    staged_source.persist(&files.source)?;
    staged_header.persist(&files.header)?;
    Ok(())
}

fn stage(dir: &Path, contents: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(file)
}

fn write_banner<W: Write>(out: &mut W, file_name: &str, description: &str) -> io::Result<()> {
    writeln!(out, "/**")?;
    writeln!(out, " * @File Name")?;
    writeln!(out, " *   {file_name}")?;
    writeln!(out, " *")?;
    writeln!(out, " * @Description")?;
    writeln!(out, " *   {description}")?;
    writeln!(out, " *   This code was auto generated by ssd1322-gen")?;
    writeln!(out, " */")?;
    writeln!(out)
}

fn write_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "/**")?;
    writeln!(out, " * Section: {title}")?;
    writeln!(out, " */")?;
    writeln!(out)
}
