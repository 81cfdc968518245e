use std::io::{self, Write};

use super::{hex_byte, write_banner, write_section};
use crate::BitmapAsset;

const BYTES_PER_LINE: usize = 12;

pub fn write_bitmap_header<W: Write>(
    out: &mut W,
    basename: &str,
    bitmaps: &[BitmapAsset],
) -> io::Result<()> {
    write_banner(
        out,
        &format!("{basename}.h"),
        "This header file provides access to the installed bitmaps",
    )?;
    write_section(out, "Included Files")?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out, "#include \"ssd1322.h\"")?;
    writeln!(out)?;

    for asset in bitmaps {
        writeln!(out, "// Bitmap Structure")?;
        writeln!(out, "extern const bitmap_t {};", asset.name)?;
        writeln!(out)?;
    }

    Ok(())
}

pub fn write_bitmap_source<W: Write>(
    out: &mut W,
    basename: &str,
    bitmaps: &[BitmapAsset],
) -> io::Result<()> {
    write_banner(
        out,
        &format!("{basename}.c"),
        "This source file contains pixel data of the installed bitmaps",
    )?;
    write_section(out, "Included Files")?;
    writeln!(out, "#include \"ssd1322.h\"")?;
    writeln!(out)?;

    write_section(out, "Module Definitions")?;
    for (index, asset) in bitmaps.iter().enumerate() {
        writeln!(out, "#define BITMAP_{index}_WIDTH    {}u", asset.bitmap.packed_width())?;
        writeln!(out, "#define BITMAP_{index}_HEIGHT   {}u", asset.bitmap.height())?;
        writeln!(out)?;
    }

    for asset in bitmaps {
        write_section(out, "Bitmap Body")?;
        writeln!(out, "// Each byte represents two pixels")?;
        writeln!(out, "const uint8_t {}_bitmap[] =", asset.name)?;
        writeln!(out, "{{")?;
        for line in asset.bitmap.bytes().chunks(BYTES_PER_LINE) {
            let tokens: Vec<String> = line.iter().copied().map(hex_byte).collect();
            writeln!(out, "    {},", tokens.join(", "))?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;
    }

    write_section(out, "Bitmap Structures")?;
    for (index, asset) in bitmaps.iter().enumerate() {
        writeln!(out, "// {} Bitmap Structure", capitalize(&asset.name))?;
        writeln!(out, "const bitmap_t {} =", asset.name)?;
        writeln!(out, "{{")?;
        writeln!(out, "    (const uint8_t *) &{}_bitmap,", asset.name)?;
        writeln!(out, "    BITMAP_{index}_WIDTH,")?;
        writeln!(out, "    BITMAP_{index}_HEIGHT")?;
        writeln!(out, "}};")?;
        writeln!(out)?;
    }

    Ok(())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
