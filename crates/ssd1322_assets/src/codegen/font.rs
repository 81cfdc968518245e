use std::io::{self, Write};

use super::{hex_byte, hex_signed, hex_word, write_banner, write_section};
use crate::{FontAsset, Glyph};

pub fn write_font_header<W: Write>(out: &mut W, font: &FontAsset) -> io::Result<()> {
    write_banner(
        out,
        &format!("{}.h", font.name),
        "This header file provides access to the installed font",
    )?;
    write_section(out, "Included Files")?;
    writeln!(out, "#include \"ssd1322.h\"")?;
    writeln!(out)?;
    writeln!(out, "// Font Structure")?;
    writeln!(out, "extern const font_t {};", font.name)
}

pub fn write_font_source<W: Write>(out: &mut W, font: &FontAsset) -> io::Result<()> {
    let name = &font.name;
    let atlas = &font.atlas;

    write_banner(
        out,
        &format!("{name}.c"),
        "This source file contains pixel data of the installed font",
    )?;
    write_section(out, "Included Files")?;
    writeln!(out, "#include \"ssd1322.h\"")?;
    writeln!(out)?;

    write_section(out, "Module Definitions")?;
    writeln!(out, "#define FONT_HEIGHT {}", atlas.font_height())?;
    writeln!(out, "#define FONT_DESCENT {}", atlas.font_descent())?;
    writeln!(out)?;

    write_section(out, "Font Table")?;
    writeln!(out, "// Font table contains glyph metadata")?;
    writeln!(out, "const font_table_entry_t {name}_font_table[] =")?;
    writeln!(out, "{{")?;
    for glyph in atlas.glyphs() {
        writeln!(
            out,
            "    {{{}, {}, {}, {}, {}}},         // {}",
            hex_word(glyph.atlas_offset),
            hex_field(glyph.bitmap.packed_width()),
            hex_field(glyph.bitmap.height()),
            hex_signed(glyph.ascent),
            hex_field(glyph.dummy_columns),
            describe(glyph),
        )?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    write_section(out, "Font Body")?;
    writeln!(out, "// Each byte represents two pixels")?;
    writeln!(out, "const uint8_t {name}_font[] =")?;
    writeln!(out, "{{")?;
    let rule = "*".repeat(72);
    for glyph in atlas.glyphs() {
        writeln!(out, "    // {rule}")?;
        writeln!(out, "    // * {}", describe(glyph))?;
        writeln!(out, "    // {rule}")?;

        let preview = glyph.bitmap.preview_rows(glyph.dummy_columns);
        for (row, picture) in glyph.bitmap.rows().zip(&preview) {
            let tokens: Vec<String> = row.iter().copied().map(hex_byte).collect();
            writeln!(out, "    {},         //  {}", tokens.join(", "), picture.trim_end())?;
        }
        writeln!(out)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    write_section(out, "Font Structure")?;
    writeln!(out, "// Initialize font structure")?;
    writeln!(out, "const font_t {name} =")?;
    writeln!(out, "{{")?;
    writeln!(out, "    (const uint8_t *) &{name}_font,")?;
    writeln!(out, "    (const font_table_entry_t *) &{name}_font_table,")?;
    writeln!(out, "    FONT_HEIGHT,")?;
    writeln!(out, "    FONT_DESCENT")?;
    writeln!(out, "}};")
}

fn hex_field(value: u32) -> String {
    format!("0x{value:02X}")
}

fn describe(glyph: &Glyph) -> String {
    format!("Character - \"{}\", Ascii - {}", glyph.character, u32::from(glyph.character))
}
