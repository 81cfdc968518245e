use super::{grid::PaddedGrid, nibble, CodecError};

/// Sixteen levels from blank to full intensity, used for text previews.
const PREVIEW_RAMP: [char; 16] =
    [' ', '.', '\'', ':', '-', '~', '=', '+', '*', 'o', 'x', '%', '#', '&', '8', '@'];

/// Controller-ready pixel data: two 4-bit pixels per byte, rows a whole number of column
/// addresses wide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBitmap {
    packed_width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PackedBitmap {
    pub fn from_padded(grid: &PaddedGrid) -> Result<Self, CodecError> {
        let bytes = nibble::pack(grid.pixels())?;
        Ok(Self { packed_width: grid.padded_width() / 4, height: grid.height(), bytes })
    }

    /// Wraps bytes packed elsewhere. Nothing checks that `bytes` matches the geometry.
    pub fn from_raw(packed_width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self { packed_width, height, bytes }
    }

    /// Width in column-address units of four pixels.
    pub fn packed_width(&self) -> u32 {
        self.packed_width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes per row: every column address covers two packed bytes.
    pub fn row_len(&self) -> usize {
        self.packed_width as usize * 2
    }

    /// Byte count implied by the geometry alone.
    pub fn expected_len(&self) -> usize {
        self.row_len() * self.height as usize
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.bytes.chunks(self.row_len().max(1))
    }

    /// Level of the pixel at `(x, y)`, counting padding columns.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.packed_width * 4 || y >= self.height {
            return None;
        }

        let index = y as usize * self.packed_width as usize * 4 + x as usize;
        let byte = *self.bytes.get(index / 2)?;
        Some(if index % 2 == 0 { byte >> 4 } else { byte & 0x0F })
    }

    /// Renders each row as text, leaving out the trailing `dummy_columns`.
    pub fn preview_rows(&self, dummy_columns: u32) -> Vec<String> {
        let visible = (self.packed_width * 4).saturating_sub(dummy_columns) as usize;
        self.rows()
            .map(|row| {
                nibble::unpack(row)
                    .into_iter()
                    .take(visible)
                    .map(|level| PREVIEW_RAMP[level as usize])
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::pad::pad;

    fn packed(pixels: &[u8], width: u32, height: u32) -> PackedBitmap {
        PackedBitmap::from_padded(&pad(pixels, width, height).unwrap()).unwrap()
    }

    #[test]
    fn width_is_in_column_units() {
        let bitmap = packed(&[0; 15], 5, 3);

        assert_eq!(bitmap.packed_width(), 2);
        assert_eq!(bitmap.height(), 3);
        assert_eq!(bitmap.bytes(), &[0u8; 12][..]);
        assert_eq!(bitmap.expected_len(), 12);
    }

    #[test]
    fn pixel_reads_back_levels() {
        let bitmap = packed(&[1, 2, 3, 4, 5, 6], 3, 2);

        assert_eq!(bitmap.pixel(0, 0), Some(1));
        assert_eq!(bitmap.pixel(2, 0), Some(3));
        assert_eq!(bitmap.pixel(3, 0), Some(0));
        assert_eq!(bitmap.pixel(1, 1), Some(5));
        assert_eq!(bitmap.pixel(4, 0), None);
        assert_eq!(bitmap.pixel(0, 2), None);
    }

    #[test]
    fn preview_hides_padding() {
        let bitmap = packed(&[15, 0, 8, 0, 15, 0], 3, 2);

        assert_eq!(bitmap.preview_rows(1), vec!["@ *".to_string(), " @ ".to_string()]);
        assert_eq!(bitmap.preview_rows(0)[0], "@ * ");
    }
}
