// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use boxsel_core::BorderPosition;

use crate::imaging::resize::Interpolation;

#[derive(Debug, Parser)]
#[command(name = "boxsel", version, about = "boxsel: select, crop and resize image regions.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/boxsel/boxsel.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override config file (default: $XDG_CONFIG_HOME/boxsel/boxsel.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Shape of the JSON printed by `select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Effective edges: x1, y1, x2, y2
    Bounds,
    /// Unscaled rectangle: x, y, width, height
    Base,
    /// Full node metadata (edges + selected flag + base rectangle)
    Metadata,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Replay a gesture script against a fresh selection and print the result
    Select {
        /// Gesture script (down/move/up/zoom/border/reset/load, one per line)
        #[arg(long, short = 's')]
        script: PathBuf,
        /// Background image; enables percentage output in verbose logs
        #[arg(long, short = 'i')]
        image: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Layout::Bounds)]
        layout: Layout,
        /// Initial border width (overrides config)
        #[arg(long)]
        border_width: Option<u32>,
        /// Initial border position (overrides config)
        #[arg(long, value_enum)]
        border_position: Option<BorderPosition>,
        /// Go through the node-dialog adapter and print the metadata field
        #[arg(long)]
        dialog: bool,
    },

    /// Print every derived view of a selection
    Inspect {
        /// Metadata JSON, or @path to read it from a file
        #[arg(long, short = 'm')]
        metadata: String,
        /// Image the selection refers to (adds percentages and clamping)
        #[arg(long, short = 'i')]
        image: Option<PathBuf>,
    },

    /// Crop an image to the selection's effective edges
    Crop {
        #[arg(long, short = 'i')]
        image: PathBuf,
        /// Metadata JSON, or @path to read it from a file
        #[arg(long, short = 'm')]
        metadata: String,
        /// Output file (default: <output_directory>/boxsel-crop-<ts>.png)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Resize an image to a preset or custom size
    Resize {
        #[arg(long, short = 'i')]
        image: PathBuf,
        /// Preset name as listed by `boxsel presets` (default: Custom)
        #[arg(long, short = 'p')]
        preset: Option<String>,
        #[arg(
            long,
            default_value_t = 1024,
            value_parser = clap::value_parser!(u32).range(64..=8192)
        )]
        width: u32,
        #[arg(
            long,
            default_value_t = 1024,
            value_parser = clap::value_parser!(u32).range(64..=8192)
        )]
        height: u32,
        /// Derive the height from the target width and the source ratio
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        keep_aspect_ratio: bool,
        #[arg(long, value_enum, default_value_t = Interpolation::Bilinear)]
        interpolation: Interpolation,
        /// Output file (default: <output_directory>/boxsel-resize-<ts>.png)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Render the selection overlay on top of the image
    Preview {
        #[arg(long, short = 'i')]
        image: PathBuf,
        /// Metadata JSON, or @path to read it from a file
        #[arg(long, short = 'm')]
        metadata: String,
        /// Output file (default: <output_directory>/boxsel-preview-<ts>.png)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// List resize presets
    Presets,
}
