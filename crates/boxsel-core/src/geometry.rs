// Author: Dustin Pilgrim
// License: MIT
//
// Pure rectangle math: base -> zoomed -> bordered, plus the drag/resize
// updates that mutate the base rectangle.

use crate::border::{BorderPosition, BorderSpec};
use crate::edge::Edge;
use crate::rect::{Bounds, PixelRegion, Point, Rect};
use crate::zoom::Zoom;

/// Smallest width/height a base rectangle may have, and the minimum span of
/// an inside-bordered region.
pub const MIN_SIZE: f64 = 1.0;

/// Transient state of an active resize gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub edge: Edge,
    pub start_pointer: Point,
    pub start_rect: Rect,
    /// Last accepted frame; a rejected axis keeps this value.
    pub current: Rect,
}

impl ResizeSession {
    pub fn new(edge: Edge, start_pointer: Point, start_rect: Rect) -> Self {
        Self {
            edge,
            start_pointer,
            start_rect,
            current: start_rect,
        }
    }
}

/// Transient state of an active move gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSession {
    pub start_pointer: Point,
    pub start_rect: Rect,
}

/// Every derived view of one selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub base: Rect,
    pub zoomed: Rect,
    pub effective: Bounds,
}

impl Geometry {
    pub fn derive(base: Rect, zoom: Zoom, border: BorderSpec) -> Self {
        let zoomed = derive_zoomed_rect(base, zoom);
        let effective = apply_border(zoomed, border.width, border.position);
        Self {
            base,
            zoomed,
            effective,
        }
    }
}

pub fn derive_zoomed_rect(base: Rect, zoom: Zoom) -> Rect {
    let c = base.center();
    let w = base.width * zoom.factor();
    let h = base.height * zoom.factor();
    Rect::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
}

pub fn apply_border(rect: Rect, border_width: u32, position: BorderPosition) -> Bounds {
    let b = f64::from(border_width);
    let r = rect.to_bounds();

    match position {
        BorderPosition::Outside => Bounds {
            x1: r.x1 - b,
            y1: r.y1 - b,
            x2: r.x2 + b,
            y2: r.y2 + b,
        },
        BorderPosition::Inside => {
            let x1 = r.x1 + b;
            let y1 = r.y1 + b;
            Bounds {
                x1,
                y1,
                x2: (r.x2 - b).max(x1 + MIN_SIZE),
                y2: (r.y2 - b).max(y1 + MIN_SIZE),
            }
        }
    }
}

/// New base rectangle after dragging `session.edge` by the cumulative
/// `delta` since the gesture started.
///
/// Each axis is evaluated on its own: if an axis would shrink below
/// [`MIN_SIZE`] it keeps the last accepted frame while the other axis still
/// follows the pointer.
pub fn resize_from_edge(session: &ResizeSession, delta: Point) -> Rect {
    let s = session.start_rect;
    let edge = session.edge;
    let mut r = session.current;

    if edge.left() {
        let w = s.width - delta.x;
        if w >= MIN_SIZE {
            r.x = s.x + delta.x;
            r.width = w;
        }
    } else if edge.right() {
        let w = s.width + delta.x;
        if w >= MIN_SIZE {
            r.x = s.x;
            r.width = w;
        }
    }

    if edge.top() {
        let h = s.height - delta.y;
        if h >= MIN_SIZE {
            r.y = s.y + delta.y;
            r.height = h;
        }
    } else if edge.bottom() {
        let h = s.height + delta.y;
        if h >= MIN_SIZE {
            r.y = s.y;
            r.height = h;
        }
    }

    r
}

/// Rectangle spanned by a drawing gesture, in any drag direction.
pub fn normalize_drag(start: Point, current: Point) -> Rect {
    Rect::new(
        start.x.min(current.x),
        start.y.min(current.y),
        (current.x - start.x).abs().max(MIN_SIZE),
        (current.y - start.y).abs().max(MIN_SIZE),
    )
}

pub fn translate(rect: Rect, delta: Point) -> Rect {
    Rect::new(rect.x + delta.x, rect.y + delta.y, rect.width, rect.height)
}

/// Half-up rounding used for every reported coordinate.
pub fn round_px(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Rounds `bounds` and intersects them with a `w`x`h` image.
pub fn clamp_to_image(bounds: Bounds, w: u32, h: u32) -> Option<PixelRegion> {
    let x0 = round_px(bounds.x1).clamp(0, i64::from(w));
    let y0 = round_px(bounds.y1).clamp(0, i64::from(h));
    let x1 = round_px(bounds.x2).clamp(0, i64::from(w));
    let y1 = round_px(bounds.y2).clamp(0, i64::from(h));

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(PixelRegion {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}
