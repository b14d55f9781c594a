// Author: Dustin Pilgrim
// License: MIT

use boxsel_core::geometry::clamp_to_image;
use boxsel_core::{Bounds, PixelRegion, RegionMetadata};
use image::{DynamicImage, GenericImageView};

/// Effective edges of `metadata` intersected with an image of `w`x`h`.
pub fn crop_region(metadata: &RegionMetadata, w: u32, h: u32) -> Result<PixelRegion, String> {
    if !metadata.selected {
        return Err("metadata has no selection".into());
    }

    let bounds = Bounds {
        x1: metadata.x1 as f64,
        y1: metadata.y1 as f64,
        x2: metadata.x2 as f64,
        y2: metadata.y2 as f64,
    };

    clamp_to_image(bounds, w, h).ok_or_else(|| {
        format!(
            "crop rect empty after clamping: ({},{})-({},{}) within {w}x{h}",
            metadata.x1, metadata.y1, metadata.x2, metadata.y2
        )
    })
}

pub fn crop_to_selection(
    img: &DynamicImage,
    metadata: &RegionMetadata,
) -> Result<DynamicImage, String> {
    let (iw, ih) = img.dimensions();
    let r = crop_region(metadata, iw, ih)?;
    Ok(img.crop_imm(r.x, r.y, r.width, r.height))
}
