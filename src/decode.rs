use std::path::Path;

use image::{RgbImage, RgbaImage};

use crate::error::{SegprepError, SegprepResult};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Extension filter shared by the input walk, the background pool and the
/// cleanup utility. Case-insensitive.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Decodes a foreground image. The pipeline composites by alpha, so a decoded
/// image whose color type carries no alpha channel is rejected here rather
/// than silently processed.
pub fn load_foreground(path: &Path) -> SegprepResult<RgbaImage> {
    let img = image::open(path).map_err(|source| SegprepError::decode(path, source))?;
    if !img.color().has_alpha() {
        return Err(SegprepError::MissingAlpha(path.to_path_buf()));
    }
    Ok(img.into_rgba8())
}

/// Decodes a pool background as RGB. Alpha, if present, is dropped.
pub fn load_background(path: &Path) -> SegprepResult<RgbImage> {
    let img = image::open(path).map_err(|source| SegprepError::decode(path, source))?;
    Ok(img.into_rgb8())
}
