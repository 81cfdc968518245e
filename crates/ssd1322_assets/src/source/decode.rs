use std::path::Path;

use image::DynamicImage;

use crate::codec::{grid::PixelGrid, CodecError};
use crate::AssetError;

/// Decodes an image file into 8-bit luminance.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<PixelGrid, AssetError> {
    let path = path.as_ref();
    let image = image::open(path)?;
    grid_from_image(&image)
        .map_err(|error| AssetError::Codec { asset: path.display().to_string(), error })
}

pub fn grid_from_image(image: &DynamicImage) -> Result<PixelGrid, CodecError> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    PixelGrid::new(width, height, gray.into_raw())
}
