use std::path::Path;

use anyhow::Context;
use image::ImageReader;

/// A decoded image normalised to packed RGB24, alpha dropped.
#[derive(Clone)]
pub struct SourceImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode the image at `path`. The format is sniffed from the file content,
/// falling back to the extension.
///
/// Open failures carry an `io::Error`, undecodable content an `image::ImageError`.
pub fn decode_rgb(path: &Path) -> anyhow::Result<SourceImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to read {}", path.display()))?;

    tracing::debug!(format = ?reader.format(), "guessed image format");

    let decoded = reader
        .decode()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(SourceImage {
        data: rgb.into_raw(),
        width,
        height,
    })
}
