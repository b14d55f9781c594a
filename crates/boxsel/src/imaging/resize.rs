// Author: Dustin Pilgrim
// License: MIT

use clap::ValueEnum;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use serde::Serialize;

pub const CUSTOM: &str = "Custom";

pub const PRESETS: [(&str, Option<(u32, u32)>); 10] = [
    (CUSTOM, None),
    ("1:1 Square 1024x1024", Some((1024, 1024))),
    ("3:4 Portrait 896x1152", Some((896, 1152))),
    ("5:8 Portrait 832x1216", Some((832, 1216))),
    ("9:16 Portrait 768x1344", Some((768, 1344))),
    ("9:21 Portrait 640x1536", Some((640, 1536))),
    ("4:3 Landscape 1152x896", Some((1152, 896))),
    ("3:2 Landscape 1216x832", Some((1216, 832))),
    ("16:9 Landscape 1344x768", Some((1344, 768))),
    ("21:9 Landscape 1536x640", Some((1536, 640))),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Bilinear,
    Bicubic,
    Nearest,
}

impl Interpolation {
    fn filter(self) -> FilterType {
        match self {
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
            Interpolation::Nearest => FilterType::Nearest,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResizeRequest {
    pub preset: String,
    pub width: u32,
    pub height: u32,
    pub keep_aspect_ratio: bool,
    pub interpolation: Interpolation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeMetadata {
    pub original_width: u32,
    pub original_height: u32,
    pub resized_width: u32,
    pub resized_height: u32,
    pub scale_x: f64,
    pub scale_y: f64,
    pub size_preset: String,
    pub keep_aspect_ratio: bool,
    pub interpolation_mode: Interpolation,
}

/// Target size for `preset`, falling back to the custom size for "Custom".
pub fn preset_size(preset: &str, custom: (u32, u32)) -> Result<(u32, u32), String> {
    PRESETS
        .iter()
        .find(|(name, _)| *name == preset)
        .map(|(_, size)| size.unwrap_or(custom))
        .ok_or_else(|| format!("unknown preset \"{preset}\" (see `boxsel presets`)"))
}

/// Output size before any pixels move.
pub fn final_size(original: (u32, u32), req: &ResizeRequest) -> Result<(u32, u32), String> {
    let (target_w, target_h) = preset_size(&req.preset, (req.width, req.height))?;
    let (ow, oh) = original;

    if ow == 0 || oh == 0 {
        return Err("source image is empty".into());
    }

    if !req.keep_aspect_ratio {
        return Ok((target_w, target_h));
    }

    // Width is the reference side.
    let h = (f64::from(target_w) * f64::from(oh) / f64::from(ow)) as u32;
    if h == 0 {
        return Err(format!(
            "aspect-preserving height rounds to 0 for {ow}x{oh} -> width {target_w}"
        ));
    }
    Ok((target_w, h))
}

pub fn resize(
    img: &DynamicImage,
    req: &ResizeRequest,
) -> Result<(DynamicImage, ResizeMetadata), String> {
    let (ow, oh) = img.dimensions();
    let (fw, fh) = final_size((ow, oh), req)?;

    let resized = if (fw, fh) == (ow, oh) {
        img.clone()
    } else {
        img.resize_exact(fw, fh, req.interpolation.filter())
    };

    let meta = ResizeMetadata {
        original_width: ow,
        original_height: oh,
        resized_width: fw,
        resized_height: fh,
        scale_x: f64::from(fw) / f64::from(ow),
        scale_y: f64::from(fh) / f64::from(oh),
        size_preset: req.preset.clone(),
        keep_aspect_ratio: req.keep_aspect_ratio,
        interpolation_mode: req.interpolation,
    };

    Ok((resized, meta))
}
