// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::border::{BorderPosition, BorderSpec};
use crate::error::BoxselError;
use crate::geometry::{round_px, Geometry, MIN_SIZE};
use crate::rect::Rect;
use crate::zoom::Zoom;

/// Externally reported selection: effective (zoomed + bordered) edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
    pub zoom: f64,
    pub border_width: u32,
    pub border_position: BorderPosition,
}

impl SelectionResult {
    pub fn from_geometry(g: &Geometry, zoom: Zoom, border: BorderSpec) -> Self {
        Self {
            x1: round_px(g.effective.x1),
            y1: round_px(g.effective.y1),
            x2: round_px(g.effective.x2),
            y2: round_px(g.effective.y2),
            zoom: zoom.factor(),
            border_width: border.width,
            border_position: border.position,
        }
    }

    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }
}

/// Base-layout export: the unscaled rectangle plus the annotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseCoordinates {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub zoom: f64,
    pub border_width: u32,
    pub border_position: BorderPosition,
}

/// Value persisted in the host's metadata field.
///
/// `base` carries the unrounded base rectangle so a reload is lossless;
/// older payloads without it are recovered from the edges.
///
/// Reading accepts every layout the session exports: this one, the bare
/// edges of a [`SelectionResult`] and the x/y/width/height of
/// [`BaseCoordinates`]. Coordinates imply a selection unless `selected` says
/// otherwise; a payload without any (`{}`) is unselected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredMetadata")]
pub struct RegionMetadata {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
    pub zoom: f64,
    pub border_width: u32,
    pub border_position: BorderPosition,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<Rect>,
}

impl Default for RegionMetadata {
    fn default() -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: 0,
            y2: 0,
            zoom: 1.0,
            border_width: 0,
            border_position: BorderPosition::Inside,
            selected: false,
            base: None,
        }
    }
}

/// Any of the exported layouts, as found in a host field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMetadata {
    x1: Option<i64>,
    y1: Option<i64>,
    x2: Option<i64>,
    y2: Option<i64>,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    zoom: Option<f64>,
    border_width: Option<u32>,
    border_position: Option<BorderPosition>,
    selected: Option<bool>,
    base: Option<Rect>,
}

impl TryFrom<StoredMetadata> for RegionMetadata {
    type Error = String;

    fn try_from(s: StoredMetadata) -> Result<Self, Self::Error> {
        let zoom = s.zoom.unwrap_or(1.0);
        let border = BorderSpec::new(
            s.border_width.unwrap_or(0),
            s.border_position.unwrap_or_default(),
        );

        let edges = match (s.x1, s.y1, s.x2, s.y2) {
            (Some(x1), Some(y1), Some(x2), Some(y2)) => Some((x1, y1, x2, y2)),
            (None, None, None, None) => None,
            _ => return Err("x1, y1, x2 and y2 must be given together".into()),
        };

        let rect = match (s.x, s.y, s.width, s.height) {
            (Some(x), Some(y), Some(w), Some(h)) => Some(Rect::new(x, y, w, h)),
            (None, None, None, None) => None,
            _ => return Err("x, y, width and height must be given together".into()),
        };

        let base = s.base.or(rect);

        let (x1, y1, x2, y2) = match (edges, base) {
            (Some(e), _) => e,
            (None, Some(b)) => {
                let g = Geometry::derive(b, Zoom::new(zoom), border);
                let r = SelectionResult::from_geometry(&g, Zoom::new(zoom), border);
                (r.x1, r.y1, r.x2, r.y2)
            }
            (None, None) => {
                if s.selected == Some(true) {
                    return Err("selected region without coordinates".into());
                }
                return Ok(Self {
                    zoom,
                    border_width: border.width,
                    border_position: border.position,
                    ..Self::default()
                });
            }
        };

        Ok(Self {
            x1,
            y1,
            x2,
            y2,
            zoom,
            border_width: border.width,
            border_position: border.position,
            selected: s.selected.unwrap_or(true),
            base,
        })
    }
}

impl RegionMetadata {
    pub fn selected(result: SelectionResult, base: Rect) -> Self {
        Self {
            x1: result.x1,
            y1: result.y1,
            x2: result.x2,
            y2: result.y2,
            zoom: result.zoom,
            border_width: result.border_width,
            border_position: result.border_position,
            selected: true,
            base: Some(base),
        }
    }

    pub fn from_json(s: &str) -> Result<Self, BoxselError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, BoxselError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn zoom(&self) -> Zoom {
        Zoom::new(self.zoom)
    }

    pub fn border(&self) -> BorderSpec {
        BorderSpec::new(self.border_width, self.border_position)
    }

    pub fn result(&self) -> SelectionResult {
        SelectionResult {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
            zoom: self.zoom,
            border_width: self.border_width,
            border_position: self.border_position,
        }
    }

    /// Base rectangle this metadata was produced from.
    ///
    /// Without an explicit `base`, the border is removed from the edges and
    /// the zoom undone around the centroid. That inverse is exact unless the
    /// inside-border floor kicked in.
    pub fn base_rect(&self) -> Result<Rect, BoxselError> {
        if let Some(base) = self.base {
            if base.width < MIN_SIZE || base.height < MIN_SIZE {
                return Err(BoxselError::EmptyRegion);
            }
            return Ok(base);
        }

        let b = self.border_width as f64;
        let (x1, y1, x2, y2) = (self.x1 as f64, self.y1 as f64, self.x2 as f64, self.y2 as f64);
        let (x1, y1, x2, y2) = match self.border_position {
            BorderPosition::Outside => (x1 + b, y1 + b, x2 - b, y2 - b),
            BorderPosition::Inside => (x1 - b, y1 - b, x2 + b, y2 + b),
        };

        let zoom = self.zoom().factor();
        let w = (x2 - x1) / zoom;
        let h = (y2 - y1) / zoom;
        if w < MIN_SIZE || h < MIN_SIZE {
            return Err(BoxselError::EmptyRegion);
        }

        let cx = (x1 + x2) / 2.0;
        let cy = (y1 + y2) / 2.0;
        Ok(Rect::new(cx - w / 2.0, cy - h / 2.0, w, h))
    }
}
