// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

use crate::error::BoxselError;

pub const DEFAULT_BORDER_WIDTH: u32 = 3;

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderPosition {
    /// Border eats into the selected area.
    #[default]
    Inside,
    /// Border grows the selected area outward.
    Outside,
}

impl BorderPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderPosition::Inside => "inside",
            BorderPosition::Outside => "outside",
        }
    }
}

impl fmt::Display for BorderPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorderPosition {
    type Err = BoxselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inside" => Ok(BorderPosition::Inside),
            "outside" => Ok(BorderPosition::Outside),
            other => Err(BoxselError::InvalidBorderPosition(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderSpec {
    pub width: u32,
    pub position: BorderPosition,
}

impl BorderSpec {
    pub const fn new(width: u32, position: BorderPosition) -> Self {
        Self { width, position }
    }
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_BORDER_WIDTH,
            position: BorderPosition::Inside,
        }
    }
}
