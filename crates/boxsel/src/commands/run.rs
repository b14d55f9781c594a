// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use boxsel_core::RegionMetadata;
use eventline::{debug, error, info};
use image::{DynamicImage, GenericImageView};

use crate::cli::{Args, Cmd};
use crate::config;
use crate::imaging::{self, crop, preview, resize};
use crate::paths;
use crate::script;

use super::{print, select};

pub fn run(args: Args) -> Result<(), String> {
    info!("starting boxsel");
    debug!("parsed args: {:?}", args.cmd);

    let config_path = args.config.unwrap_or_else(paths::default_config_path);
    debug!("config: {}", config_path.display());

    let cfg = config::load(&config_path).map_err(|e| {
        error!("{e}");
        format!("{}: {e}", config_path.display())
    })?;

    match args.cmd {
        Cmd::Select {
            script: script_path,
            image,
            layout,
            border_width,
            border_position,
            dialog,
        } => {
            let src = fs::read_to_string(&script_path)
                .map_err(|e| format!("read script {}: {e}", script_path.display()))?;
            let lines = script::parse(&src)?;
            info!("loaded {} script commands from {}", lines.len(), script_path.display());

            let mut defaults = cfg.session_defaults();
            if let Some(w) = border_width {
                defaults.border.width = w;
            }
            if let Some(p) = border_position {
                defaults.border.position = p;
            }

            if dialog {
                let image = image.ok_or_else(|| "--dialog needs --image".to_string())?;
                select::via_dialog(defaults, &lines, &image, cfg.ready_timeout)
            } else {
                let size = match image {
                    Some(path) => Some(imaging::open(&path)?.dimensions()),
                    None => None,
                };
                select::standalone(defaults, &lines, layout, size)
            }
        }

        Cmd::Inspect { metadata, image } => {
            let metadata = read_metadata(&metadata)?;
            let size = match image {
                Some(path) => Some(imaging::open(&path)?.dimensions()),
                None => None,
            };
            print::print_inspect(&metadata, size)
        }

        Cmd::Crop { image, metadata, out } => {
            let metadata = read_metadata(&metadata)?;
            let img = imaging::open(&image)?;
            let cropped = crop::crop_to_selection(&img, &metadata)?;

            let out = out.unwrap_or_else(|| paths::default_output_path(&cfg, "crop"));
            save_and_report(&cropped, &out)
        }

        Cmd::Resize {
            image,
            preset,
            width,
            height,
            keep_aspect_ratio,
            interpolation,
            out,
        } => {
            let img = imaging::open(&image)?;
            let req = resize::ResizeRequest {
                preset: preset.unwrap_or_else(|| resize::CUSTOM.to_string()),
                width,
                height,
                keep_aspect_ratio,
                interpolation,
            };

            let (resized, meta) = resize::resize(&img, &req)?;
            info!(
                "resized {}x{} -> {}x{} (preset: {}, keep_aspect: {})",
                meta.original_width,
                meta.original_height,
                meta.resized_width,
                meta.resized_height,
                meta.size_preset,
                meta.keep_aspect_ratio
            );

            let out = out.unwrap_or_else(|| paths::default_output_path(&cfg, "resize"));
            imaging::save(&resized, &out)?;
            info!("saved to: {}", out.display());
            print::print_json(&meta)
        }

        Cmd::Preview { image, metadata, out } => {
            let metadata = read_metadata(&metadata)?;
            let img = imaging::open(&image)?;
            let rendered = preview::render_preview(&img, &metadata, cfg.accent_colour)?;

            let out = out.unwrap_or_else(|| paths::default_output_path(&cfg, "preview"));
            save_and_report(&DynamicImage::ImageRgba8(rendered), &out)
        }

        Cmd::Presets => {
            print::print_presets();
            Ok(())
        }
    }
}

fn save_and_report(img: &DynamicImage, out: &Path) -> Result<(), String> {
    imaging::save(img, out)?;
    info!("saved to: {}", out.display());
    println!("saved to: {}", out.display());
    Ok(())
}

/// Inline JSON, or `@path` to read it from a file.
fn read_metadata(arg: &str) -> Result<RegionMetadata, String> {
    let json = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("read metadata {path}: {e}"))?,
        None => arg.to_string(),
    };

    RegionMetadata::from_json(&json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use boxsel_core::{SelectionSession, SessionDefaults};

    use super::*;
    use crate::cli::Layout;

    #[test]
    fn metadata_from_inline_json() {
        let m = read_metadata(r#"{"x1":1,"y1":2,"x2":3,"y2":4,"selected":true}"#).unwrap();
        assert!(m.selected);
        assert_eq!((m.x1, m.y2), (1, 4));
    }

    #[test]
    fn every_select_layout_feeds_crop() {
        let script = script::parse("down 10 10\nmove 110 60\nup 110 60\nzoom 2").unwrap();
        let mut session = SelectionSession::new(SessionDefaults::default());
        script::apply(&mut session, &script).unwrap();

        for layout in [Layout::Bounds, Layout::Base, Layout::Metadata] {
            let json = select::layout_json(&session, layout).unwrap();
            let m = read_metadata(&json).unwrap();
            assert!(m.selected, "{layout:?}");

            // Effective edges (-37,-12)-(157,82) clipped to the image.
            let r = crop::crop_region(&m, 200, 100).unwrap();
            assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 157, 82), "{layout:?}");
        }
    }

    #[test]
    fn metadata_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        fs::write(&path, r#"{"selected":false}"#).unwrap();

        let m = read_metadata(&format!("@{}", path.display())).unwrap();
        assert!(!m.selected);
        assert!(read_metadata("@/definitely/not/here.json").is_err());
        assert!(read_metadata("{oops").is_err());
    }
}
