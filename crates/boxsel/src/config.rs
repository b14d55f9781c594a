// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use boxsel_core::{BorderPosition, BorderSpec, SessionDefaults, Zoom, HANDLE_HIT};
use boxsel_host::DEFAULT_READY_TIMEOUT;
use rune_cfg::RuneConfig;

const KEYS: [&str; 7] = [
    "boxsel.border_width",
    "boxsel.border_position",
    "boxsel.zoom",
    "boxsel.handle_radius",
    "boxsel.ready_timeout_ms",
    "boxsel.output_directory",
    "boxsel.accent_colour",
];

#[derive(Debug, Clone)]
pub struct BoxselConfig {
    pub border: BorderSpec,
    pub zoom: Zoom,
    pub handle_radius: f64,
    pub ready_timeout: Duration,
    pub output_directory: PathBuf,
    pub accent_colour: u32, // ARGB
}

impl Default for BoxselConfig {
    fn default() -> Self {
        Self {
            border: BorderSpec::default(),
            zoom: Zoom::ONE,
            handle_radius: HANDLE_HIT,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            output_directory: default_output_dir(),
            accent_colour: 0xFF0A_84FF, // default blue
        }
    }
}

impl BoxselConfig {
    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            border: self.border,
            zoom: self.zoom,
            handle_radius: self.handle_radius,
        }
    }
}

/// Missing file means defaults.
pub fn load(path: &Path) -> Result<BoxselConfig, String> {
    if !path.exists() {
        return Ok(BoxselConfig::default());
    }

    let rc = RuneConfig::from_file(path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<BoxselConfig, String> {
    let mut cfg = BoxselConfig::default();

    if !rc.has("boxsel") {
        return Ok(cfg);
    }

    for key in KEYS {
        if let Some(value) = rc
            .get_optional::<String>(key)
            .map_err(|e| format!("config error at {key}: {e}"))?
        {
            apply_value(&mut cfg, key, &value).map_err(|e| format!("config error at {key}: {e}"))?;
        }
    }

    Ok(cfg)
}

fn apply_value(cfg: &mut BoxselConfig, key: &str, value: &str) -> Result<(), String> {
    let value = value.trim();

    match key {
        "boxsel.border_width" => {
            cfg.border.width = value
                .parse()
                .map_err(|_| format!("expected a non-negative integer, got \"{value}\""))?;
        }
        "boxsel.border_position" => {
            cfg.border.position = value.parse::<BorderPosition>().map_err(|e| e.to_string())?;
        }
        "boxsel.zoom" => {
            let z: f64 = value
                .parse()
                .map_err(|_| format!("expected a number, got \"{value}\""))?;
            cfg.zoom = Zoom::new(z);
        }
        "boxsel.handle_radius" => {
            let r: f64 = value
                .parse()
                .map_err(|_| format!("expected a number, got \"{value}\""))?;
            if !(r.is_finite() && r > 0.0) {
                return Err(format!("handle radius must be positive, got {r}"));
            }
            cfg.handle_radius = r;
        }
        "boxsel.ready_timeout_ms" => {
            let ms: u64 = value
                .parse()
                .map_err(|_| format!("expected milliseconds, got \"{value}\""))?;
            cfg.ready_timeout = Duration::from_millis(ms);
        }
        "boxsel.output_directory" => {
            cfg.output_directory = expand_env(value);
        }
        "boxsel.accent_colour" => {
            cfg.accent_colour = parse_hex_colour(value)?;
        }
        other => return Err(format!("unknown key {other}")),
    }

    Ok(())
}

fn parse_hex_colour(s: &str) -> Result<u32, String> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| "colour must start with #".to_string())?;

    if hex.len() != 6 {
        return Err("colour must be 6 hex digits (RRGGBB)".into());
    }

    let rgb = u32::from_str_radix(hex, 16).map_err(|_| "invalid hex colour".to_string())?;

    Ok(0xFF00_0000 | rgb)
}

fn expand_env(s: &str) -> PathBuf {
    let mut out = s.to_string();

    if out.contains("$env.HOME") {
        if let Ok(home) = env::var("HOME") {
            out = out.replace("$env.HOME", &home);
        }
    }

    PathBuf::from(out)
}

fn default_output_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join("Pictures").join("boxsel")
}
