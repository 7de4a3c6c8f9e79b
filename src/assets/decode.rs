use std::sync::Arc;

use anyhow::Context;

use crate::assets::color::Color;
use crate::foundation::error::SceneResult;

/// Raster image ready for blitting: premultiplied RGBA8, shared between frames and backends.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode any format `image` recognizes into a [`PreparedImage`].
pub fn decode_image(bytes: &[u8]) -> SceneResult<PreparedImage> {
    let mut rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .into_rgba8();

    for px in rgba.pixels_mut() {
        let [r, g, b, a] = px.0;
        px.0 = Color::rgba(r, g, b, a).to_premul_rgba8();
    }

    Ok(PreparedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba8_premul: Arc::new(rgba.into_raw()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
