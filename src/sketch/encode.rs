use crate::sketch::raster::Raster;
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::io::Cursor;

/// Encode the raster as PNG bytes.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let image = image::RgbaImage::from_raw(
        raster.width(),
        raster.height(),
        raster.pixels().to_vec(),
    )
    .ok_or_else(|| anyhow!("raster buffer does not match its dimensions"))?;

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .context("encode canvas as png")?;
    Ok(bytes)
}

/// Encode the raster as the base64 PNG payload the prediction API expects.
/// The payload is plain base64 with no `data:` URL prefix.
pub fn encode_png_base64(raster: &Raster) -> Result<String> {
    let bytes = encode_png(raster)?;
    Ok(general_purpose::STANDARD.encode(bytes))
}
