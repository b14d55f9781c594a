// Author: Dustin Pilgrim
// License: MIT

use crate::edge::Edge;
use crate::rect::{Point, Rect};

/// Default grab radius around handles, in pixels.
pub const HANDLE_HIT: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle(Edge),
    Inside,
    Outside,
}

fn dist2(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

fn corner_hit(r: Rect, p: Point, radius: f64) -> Option<Edge> {
    // Circular grab zones centered on the corners; nearest corner wins.
    let corners = [
        (Point::new(r.x, r.y), Edge::TopLeft),
        (Point::new(r.right(), r.y), Edge::TopRight),
        (Point::new(r.x, r.bottom()), Edge::BottomLeft),
        (Point::new(r.right(), r.bottom()), Edge::BottomRight),
    ];

    let (d, edge) = corners
        .into_iter()
        .map(|(c, e)| (dist2(p, c), e))
        .min_by(|a, b| a.0.total_cmp(&b.0))?;

    (d <= radius * radius).then_some(edge)
}

fn edge_hit(r: Rect, p: Point, radius: f64) -> Option<Edge> {
    let in_x = p.x >= r.x - radius && p.x <= r.right() + radius;
    let in_y = p.y >= r.y - radius && p.y <= r.bottom() + radius;

    let bands = [
        ((p.y - r.y).abs(), in_x, Edge::Top),
        ((p.y - r.bottom()).abs(), in_x, Edge::Bottom),
        ((p.x - r.x).abs(), in_y, Edge::Left),
        ((p.x - r.right()).abs(), in_y, Edge::Right),
    ];

    bands
        .into_iter()
        .filter(|(d, within, _)| *within && *d <= radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, _, e)| e)
}

/// Classifies a pointer against the rendered selection rectangle.
///
/// Order: corner handles, edge bands, interior, outside.
pub fn hit_test(rendered: Rect, p: Point, radius: f64) -> HitTarget {
    if let Some(edge) = corner_hit(rendered, p, radius) {
        return HitTarget::Handle(edge);
    }

    if let Some(edge) = edge_hit(rendered, p, radius) {
        return HitTarget::Handle(edge);
    }

    if rendered.contains(p) {
        HitTarget::Inside
    } else {
        HitTarget::Outside
    }
}
