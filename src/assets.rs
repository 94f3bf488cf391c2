//! Image asset loading

use std::path::Path;

use anyhow::{Context, Result};

use crate::renderer::Surface;

/// Decode the image at `path` into an RGBA surface.
///
/// Format is guessed from the file contents, so a `.bmp` that is really a PNG
/// still loads.
pub fn load_image(path: impl AsRef<Path>) -> Result<Surface> {
    let path = path.as_ref();
    let image = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .with_context(|| format!("failed to load image {}", path.display()))?
        .decode()
        .with_context(|| format!("failed to load image {}", path.display()))?
        .into_rgba8();

    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(Surface::from_image(image))
}
