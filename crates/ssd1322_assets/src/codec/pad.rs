use super::{
    grid::{PaddedGrid, PixelGrid},
    CodecError,
};

/// Number of zero columns needed to bring `width` up to a multiple of four.
pub fn dummy_columns_for(width: u32) -> u32 {
    (4 - width % 4) % 4
}

/// Right-pads every row of a `width * height` raster to a multiple of four pixels.
pub fn pad(pixels: &[u8], width: u32, height: u32) -> Result<PaddedGrid, CodecError> {
    let grid = PixelGrid::new(width, height, pixels.to_vec())?;
    Ok(pad_grid(&grid))
}

pub fn pad_grid(grid: &PixelGrid) -> PaddedGrid {
    let width = grid.width();
    let dummy = dummy_columns_for(width);
    let padded_width = width + dummy;

    let mut pixels = Vec::with_capacity(padded_width as usize * grid.height() as usize);
    for row in grid.rows() {
        pixels.extend_from_slice(row);
        pixels.extend(std::iter::repeat(0).take(dummy as usize));
    }

    PaddedGrid::new(width, padded_width, grid.height(), pixels)
}
