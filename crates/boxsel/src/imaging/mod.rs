// Author: Dustin Pilgrim
// License: MIT

pub mod crop;
pub mod pixels;
pub mod preview;
pub mod resize;

use std::path::Path;

use image::DynamicImage;

use crate::paths::ensure_parent_dir;

pub fn open(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| format!("open image {}: {e}", path.display()))
}

pub fn save(img: &DynamicImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path).map_err(|e| format!("create dir for {}: {e}", path.display()))?;
    img.save(path)
        .map_err(|e| format!("save image {}: {e}", path.display()))
}
