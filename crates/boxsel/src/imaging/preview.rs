// Author: Dustin Pilgrim
// License: MIT

use boxsel_core::geometry::round_px;
use boxsel_core::{BorderPosition, Geometry, RegionMetadata};
use image::{DynamicImage, RgbaImage};

use super::pixels::{dim_outside, draw_border, draw_corner_handles, fill_band};

const DIM_ARGB: u32 = 0x6600_0000;
const OUTLINE_ARGB: u32 = 0xFFFF_FFFF;
const HANDLE_INNER_ARGB: u32 = 0xFFFF_FFFF;
const BAND_ALPHA: u32 = 0x8000_0000;

fn px(bounds: boxsel_core::Bounds) -> [i64; 4] {
    [
        round_px(bounds.x1),
        round_px(bounds.y1),
        round_px(bounds.x2),
        round_px(bounds.y2),
    ]
}

/// Draws the selection on top of `img`: dimmed surroundings, the border band
/// in a translucent accent, a 1px outline on the zoomed rectangle and corner
/// handles.
pub fn render_preview(
    img: &DynamicImage,
    metadata: &RegionMetadata,
    accent_argb: u32,
) -> Result<RgbaImage, String> {
    if !metadata.selected {
        return Err("metadata has no selection".into());
    }

    let base = metadata.base_rect().map_err(|e| e.to_string())?;
    let g = Geometry::derive(base, metadata.zoom(), metadata.border());

    let zoomed = px(g.zoomed.to_bounds());
    let effective = px(g.effective);

    let mut out = img.to_rgba8();

    let [ex1, ey1, ex2, ey2] = effective;
    dim_outside(&mut out, ex1, ey1, ex2 - ex1, ey2 - ey1, DIM_ARGB);

    let band = (accent_argb & 0x00FF_FFFF) | BAND_ALPHA;
    match metadata.border_position {
        BorderPosition::Inside => fill_band(&mut out, zoomed, effective, band),
        BorderPosition::Outside => fill_band(&mut out, effective, zoomed, band),
    }

    let [zx1, zy1, zx2, zy2] = zoomed;
    draw_border(&mut out, zx1, zy1, zx2 - zx1, zy2 - zy1, 1, OUTLINE_ARGB);
    draw_corner_handles(&mut out, zx1, zy1, zx2 - zx1, zy2 - zy1, accent_argb, HANDLE_INNER_ARGB);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use boxsel_core::{BorderSpec, Rect, SelectionResult, Zoom};
    use image::Rgba;

    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn metadata(border: BorderSpec) -> RegionMetadata {
        let base = Rect::new(20.0, 20.0, 40.0, 40.0);
        let g = Geometry::derive(base, Zoom::ONE, border);
        RegionMetadata::selected(SelectionResult::from_geometry(&g, Zoom::ONE, border), base)
    }

    #[test]
    fn dims_outside_and_keeps_interior() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(80, 80, WHITE));
        let m = metadata(BorderSpec::new(4, BorderPosition::Inside));
        let out = render_preview(&img, &m, 0xFF00_FF00).unwrap();

        assert_eq!(out.dimensions(), (80, 80));
        // interior of the effective rect (24..56)
        assert_eq!(*out.get_pixel(40, 40), WHITE);
        // far corner is dimmed
        assert!(out.get_pixel(75, 5)[0] < 255);
        // border band picks up the accent
        let band = out.get_pixel(40, 22);
        assert!(band[1] > band[0]);
    }

    #[test]
    fn outside_band_sits_beyond_the_rectangle() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(80, 80, WHITE));
        let m = metadata(BorderSpec::new(4, BorderPosition::Outside));
        let out = render_preview(&img, &m, 0xFF00_FF00).unwrap();

        let band = out.get_pixel(40, 17);
        assert!(band[1] > band[0]);
        assert_eq!(*out.get_pixel(40, 30), WHITE);
    }

    #[test]
    fn base_layout_renders_like_full_metadata() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(80, 80, WHITE));
        let full = metadata(BorderSpec::new(4, BorderPosition::Inside));
        let bare = RegionMetadata::from_json(
            r#"{"x":20,"y":20,"width":40,"height":40,"borderWidth":4,"borderPosition":"inside"}"#,
        )
        .unwrap();

        assert_eq!(
            render_preview(&img, &bare, 0xFF00_FF00).unwrap(),
            render_preview(&img, &full, 0xFF00_FF00).unwrap()
        );
    }

    #[test]
    fn unselected_is_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        assert!(render_preview(&img, &RegionMetadata::default(), 0xFF00_00FF).is_err());
    }
}
