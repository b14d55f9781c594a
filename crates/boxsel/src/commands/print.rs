// Author: Dustin Pilgrim
// License: MIT

use boxsel_core::geometry::{clamp_to_image, round_px};
use boxsel_core::{Geometry, Rect, RegionMetadata};
use serde::Serialize;

use crate::imaging::resize::PRESETS;

/// Base rectangle as percentages of a `w`x`h` image: x, y, width, height.
pub fn percentages(base: Rect, w: u32, h: u32) -> [f64; 4] {
    let w = f64::from(w.max(1));
    let h = f64::from(h.max(1));
    [
        base.x / w * 100.0,
        base.y / h * 100.0,
        base.width / w * 100.0,
        base.height / h * 100.0,
    ]
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("encode json: {e}"))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    println!("{}", to_json(value)?);
    Ok(())
}

pub fn print_inspect(
    metadata: &RegionMetadata,
    image_size: Option<(u32, u32)>,
) -> Result<(), String> {
    println!("selected: {}", metadata.selected);
    println!("zoom: {:.2} ({}%)", metadata.zoom().factor(), metadata.zoom().percent());
    println!("border: {}px {}", metadata.border_width, metadata.border_position);

    if !metadata.selected {
        return Ok(());
    }

    let base = metadata.base_rect().map_err(|e| e.to_string())?;
    let g = Geometry::derive(base, metadata.zoom(), metadata.border());

    println!(
        "base: x={} y={} width={} height={}",
        round_px(base.x),
        round_px(base.y),
        round_px(base.width),
        round_px(base.height)
    );
    println!(
        "zoomed: x={} y={} width={} height={}",
        round_px(g.zoomed.x),
        round_px(g.zoomed.y),
        round_px(g.zoomed.width),
        round_px(g.zoomed.height)
    );
    println!(
        "effective: ({}, {}) - ({}, {})",
        round_px(g.effective.x1),
        round_px(g.effective.y1),
        round_px(g.effective.x2),
        round_px(g.effective.y2)
    );

    if let Some((w, h)) = image_size {
        let [px, py, pw, ph] = percentages(base, w, h);
        println!("image: {w}x{h}");
        println!("percent: x={px:.2}% y={py:.2}% w={pw:.2}% h={ph:.2}%");

        match clamp_to_image(g.effective, w, h) {
            Some(r) => println!(
                "region: x={} y={} width={} height={}",
                r.x, r.y, r.width, r.height
            ),
            None => println!("region: (outside image)"),
        }
    }

    Ok(())
}

pub fn print_presets() {
    for (name, size) in PRESETS {
        match size {
            Some((w, h)) => println!("{name:<28} {w}x{h}"),
            None => println!("{name:<28} (--width/--height)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_of_image() {
        let p = percentages(Rect::new(50.0, 25.0, 100.0, 50.0), 200, 100);
        assert_eq!(p, [25.0, 25.0, 50.0, 50.0]);
    }

    #[test]
    fn zero_sized_image_does_not_divide_by_zero() {
        let p = percentages(Rect::new(1.0, 1.0, 1.0, 1.0), 0, 0);
        assert!(p.iter().all(|v| v.is_finite()));
    }
}
