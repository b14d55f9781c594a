// Author: Dustin Pilgrim
// License: MIT

use image::{Rgba, RgbaImage};

pub const HANDLE_SIZE: i64 = 8;

/// ARGB -> straight RGBA.
pub fn argb_to_rgba(argb: u32) -> Rgba<u8> {
    let [a, r, g, b] = argb.to_be_bytes();
    Rgba([r, g, b, a])
}

/// Source-over blend of `argb` onto an opaque-ish pixel.
fn blend(dst: &mut Rgba<u8>, argb: u32) {
    let src = argb_to_rgba(argb);
    let a = u32::from(src[3]);

    if a == 0xFF {
        *dst = src;
        return;
    }
    if a == 0 {
        return;
    }

    for c in 0..3 {
        let s = u32::from(src[c]);
        let d = u32::from(dst[c]);
        dst[c] = ((s * a + d * (0xFF - a) + 0x7F) / 0xFF) as u8;
    }
    dst[3] = dst[3].max(src[3]);
}

pub fn fill_rect(img: &mut RgbaImage, x: i64, y: i64, rw: i64, rh: i64, argb: u32) {
    let w = i64::from(img.width());
    let h = i64::from(img.height());

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + rw).min(w);
    let y1 = (y + rh).min(h);
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    for yy in y0..y1 {
        for xx in x0..x1 {
            blend(img.get_pixel_mut(xx as u32, yy as u32), argb);
        }
    }
}

/// Everything outside `[x, x+rw) x [y, y+rh)` gets `argb` blended over it.
pub fn dim_outside(img: &mut RgbaImage, x: i64, y: i64, rw: i64, rh: i64, argb: u32) {
    let w = i64::from(img.width());
    let h = i64::from(img.height());

    fill_rect(img, 0, 0, w, y, argb);
    fill_rect(img, 0, y + rh, w, h - (y + rh), argb);
    fill_rect(img, 0, y, x, rh, argb);
    fill_rect(img, x + rw, y, w - (x + rw), rh, argb);
}

/// Fills the band between `outer` and `inner` (both x1, y1, x2, y2).
pub fn fill_band(img: &mut RgbaImage, outer: [i64; 4], inner: [i64; 4], argb: u32) {
    let [ox1, oy1, ox2, oy2] = outer;
    let [ix1, iy1, ix2, iy2] = inner;

    if ox2 <= ox1 || oy2 <= oy1 {
        return;
    }

    fill_rect(img, ox1, oy1, ox2 - ox1, iy1 - oy1, argb);
    fill_rect(img, ox1, iy2, ox2 - ox1, oy2 - iy2, argb);
    fill_rect(img, ox1, iy1, ix1 - ox1, iy2 - iy1, argb);
    fill_rect(img, ix2, iy1, ox2 - ix2, iy2 - iy1, argb);
}

pub fn draw_border(img: &mut RgbaImage, x: i64, y: i64, rw: i64, rh: i64, t: i64, argb: u32) {
    if rw <= 0 || rh <= 0 || t <= 0 {
        return;
    }
    fill_rect(img, x, y, rw, t, argb);
    fill_rect(img, x, y + rh - t, rw, t, argb);
    fill_rect(img, x, y + t, t, rh - 2 * t, argb);
    fill_rect(img, x + rw - t, y + t, t, rh - 2 * t, argb);
}

pub fn draw_corner_handles(
    img: &mut RgbaImage,
    x: i64,
    y: i64,
    rw: i64,
    rh: i64,
    outer: u32,
    inner: u32,
) {
    let half = HANDLE_SIZE / 2;
    let handles = [
        (x - half, y - half),
        (x + rw - half, y - half),
        (x - half, y + rh - half),
        (x + rw - half, y + rh - half),
    ];

    for &(hx, hy) in &handles {
        draw_handle(img, hx, hy, outer, inner);
    }
}

fn draw_handle(img: &mut RgbaImage, x: i64, y: i64, outer: u32, inner: u32) {
    fill_rect(img, x, y, HANDLE_SIZE, HANDLE_SIZE, outer);
    let inner_sz = 2;
    let ix = x + (HANDLE_SIZE - inner_sz) / 2;
    let iy = y + (HANDLE_SIZE - inner_sz) / 2;
    fill_rect(img, ix, iy, inner_sz, inner_sz, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF_0000;

    fn canvas(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn fill_clips_to_image() {
        let mut img = canvas(4, 4);
        fill_rect(&mut img, -2, -2, 4, 4, RED);
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn half_alpha_blends() {
        let mut img = canvas(1, 1);
        fill_rect(&mut img, 0, 0, 1, 1, 0x8000_0000);
        let p = img.get_pixel(0, 0);
        assert!(p[0] > 100 && p[0] < 140);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn dim_leaves_inside_untouched() {
        let mut img = canvas(10, 10);
        dim_outside(&mut img, 2, 2, 4, 4, 0xFF00_0000);
        assert_eq!(*img.get_pixel(3, 3), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(9, 4), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(4, 9), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn band_covers_only_the_ring() {
        let mut img = canvas(10, 10);
        fill_band(&mut img, [1, 1, 9, 9], [3, 3, 7, 7], RED);
        assert_eq!(*img.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(8, 5), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(9, 9), Rgba([255, 255, 255, 255]));
    }
}
