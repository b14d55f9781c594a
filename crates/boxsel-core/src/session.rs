// Author: Dustin Pilgrim
// License: MIT

use crate::border::{BorderPosition, BorderSpec};
use crate::error::BoxselError;
use crate::geometry::{self, Geometry, MoveSession, ResizeSession};
use crate::hit::{self, HitTarget, HANDLE_HIT};
use crate::metadata::{BaseCoordinates, RegionMetadata, SelectionResult};
use crate::rect::{Point, Rect};
use crate::zoom::Zoom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionDefaults {
    pub border: BorderSpec,
    pub zoom: Zoom,
    pub handle_radius: f64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            border: BorderSpec::default(),
            zoom: Zoom::ONE,
            handle_radius: HANDLE_HIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
    Complete,
    Resizing,
    Moving,
}

/// Which selection-dependent controls the shell should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub reset: bool,
    pub confirm: bool,
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    None,
    Drawing { start: Point },
    Resizing(ResizeSession),
    Moving(MoveSession),
}

/// One selection over one background image.
///
/// The base rectangle is the only stored geometry; zoomed and bordered
/// views are recomputed from it on every query.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    base: Option<Rect>,
    zoom: Zoom,
    border: BorderSpec,
    gesture: Gesture,
    defaults: SessionDefaults,
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}

impl SelectionSession {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            base: None,
            zoom: defaults.zoom,
            border: defaults.border,
            gesture: Gesture::None,
            defaults,
        }
    }

    /// Session that starts out Complete with `initial`, or Idle.
    pub fn init(defaults: SessionDefaults, initial: Option<Rect>) -> Self {
        let mut s = Self::new(defaults);
        s.base = initial.map(|r| {
            geometry::normalize_drag(Point::new(r.x, r.y), Point::new(r.right(), r.bottom()))
        });
        s
    }

    pub fn phase(&self) -> Phase {
        match (self.base, self.gesture) {
            (None, _) => Phase::Idle,
            (Some(_), Gesture::None) => Phase::Complete,
            (Some(_), Gesture::Drawing { .. }) => Phase::Drawing,
            (Some(_), Gesture::Resizing(_)) => Phase::Resizing,
            (Some(_), Gesture::Moving(_)) => Phase::Moving,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.base.is_some()
    }

    pub fn base(&self) -> Option<Rect> {
        self.base
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn border(&self) -> BorderSpec {
        self.border
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.base
            .map(|base| Geometry::derive(base, self.zoom, self.border))
    }

    /// Rectangle the shell should draw (zoomed around the centroid).
    pub fn render_rect(&self) -> Option<Rect> {
        self.geometry().map(|g| g.zoomed)
    }

    pub fn active_resize(&self) -> Option<&ResizeSession> {
        match &self.gesture {
            Gesture::Resizing(rs) => Some(rs),
            _ => None,
        }
    }

    // -------------------- pointer gestures --------------------

    pub fn pointer_down(&mut self, p: Point) -> Option<Rect> {
        let target = self
            .render_rect()
            .map(|r| hit::hit_test(r, p, self.defaults.handle_radius));

        match (target, self.base) {
            (Some(HitTarget::Handle(edge)), Some(base)) => {
                self.gesture = Gesture::Resizing(ResizeSession::new(edge, p, base));
            }
            (Some(HitTarget::Inside), Some(base)) => {
                self.gesture = Gesture::Moving(MoveSession {
                    start_pointer: p,
                    start_rect: base,
                });
            }
            _ => {
                // New drawing replaces whatever was there.
                self.base = Some(geometry::normalize_drag(p, p));
                self.gesture = Gesture::Drawing { start: p };
            }
        }

        self.render_rect()
    }

    /// Returns `None` when no gesture is in progress.
    pub fn pointer_move(&mut self, p: Point) -> Option<Rect> {
        match &mut self.gesture {
            Gesture::None => return None,
            Gesture::Drawing { start } => {
                self.base = Some(geometry::normalize_drag(*start, p));
            }
            Gesture::Resizing(rs) => {
                let r = geometry::resize_from_edge(rs, p.delta_from(rs.start_pointer));
                rs.current = r;
                self.base = Some(r);
            }
            Gesture::Moving(ms) => {
                self.base = Some(geometry::translate(
                    ms.start_rect,
                    p.delta_from(ms.start_pointer),
                ));
            }
        }

        self.render_rect()
    }

    /// Ends the active gesture at `p`. Without a gesture this is a no-op.
    pub fn pointer_up(&mut self, p: Point) -> Option<Rect> {
        if matches!(self.gesture, Gesture::None) {
            return self.render_rect();
        }

        self.pointer_move(p);
        self.gesture = Gesture::None;
        self.render_rect()
    }

    // -------------------- annotations --------------------

    /// Zoom only applies to an existing selection.
    pub fn set_zoom(&mut self, factor: f64) -> Option<Rect> {
        if self.base.is_some() {
            self.zoom = Zoom::new(factor);
        }
        self.render_rect()
    }

    pub fn zoom_in(&mut self) -> Option<Rect> {
        self.set_zoom(self.zoom.step_in().factor())
    }

    pub fn zoom_out(&mut self) -> Option<Rect> {
        self.set_zoom(self.zoom.step_out().factor())
    }

    pub fn set_border(&mut self, width: u32, position: BorderPosition) -> Option<Rect> {
        self.border = BorderSpec::new(width, position);
        self.render_rect()
    }

    // -------------------- reporting --------------------

    pub fn result(&self) -> Option<SelectionResult> {
        self.geometry()
            .map(|g| SelectionResult::from_geometry(&g, self.zoom, self.border))
    }

    pub fn base_coordinates(&self) -> Option<BaseCoordinates> {
        self.base.map(|b| BaseCoordinates {
            x: geometry::round_px(b.x),
            y: geometry::round_px(b.y),
            width: geometry::round_px(b.width),
            height: geometry::round_px(b.height),
            zoom: self.zoom.factor(),
            border_width: self.border.width,
            border_position: self.border.position,
        })
    }

    pub fn metadata(&self) -> RegionMetadata {
        match (self.result(), self.base) {
            (Some(result), Some(base)) => RegionMetadata::selected(result, base),
            _ => RegionMetadata {
                zoom: self.zoom.factor(),
                border_width: self.border.width,
                border_position: self.border.position,
                ..RegionMetadata::default()
            },
        }
    }

    /// Restores a previously reported selection.
    ///
    /// Unselected metadata only carries the border settings over.
    pub fn load(&mut self, metadata: &RegionMetadata) -> Result<Option<Rect>, BoxselError> {
        if !metadata.selected {
            self.reset();
            self.border = metadata.border();
            return Ok(None);
        }

        let base = metadata.base_rect()?;
        self.base = Some(base);
        self.zoom = metadata.zoom();
        self.border = metadata.border();
        self.gesture = Gesture::None;
        Ok(self.render_rect())
    }

    pub fn load_json(&mut self, json: &str) -> Result<Option<Rect>, BoxselError> {
        let metadata = RegionMetadata::from_json(json)?;
        self.load(&metadata)
    }

    pub fn confirm(&self) -> Result<SelectionResult, BoxselError> {
        self.result().ok_or(BoxselError::NoSelection)
    }

    pub fn controls(&self) -> Controls {
        let selected = self.base.is_some();
        Controls {
            zoom_in: selected && self.zoom.can_step_in(),
            zoom_out: selected && self.zoom.can_step_out(),
            reset: selected,
            confirm: selected,
        }
    }

    /// Back to Idle. Zoom returns to the default; the border is kept.
    pub fn reset(&mut self) {
        self.base = None;
        self.gesture = Gesture::None;
        self.zoom = self.defaults.zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    fn drawn(from: (f64, f64), to: (f64, f64)) -> SelectionSession {
        let mut s = SelectionSession::default();
        s.pointer_down(Point::new(from.0, from.1));
        s.pointer_move(Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
        s.pointer_up(Point::new(to.0, to.1));
        s
    }

    #[test]
    fn draw_transitions_to_complete() {
        let mut s = SelectionSession::default();
        assert_eq!(s.phase(), Phase::Idle);

        s.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(s.phase(), Phase::Drawing);

        s.pointer_move(Point::new(50.0, 30.0));
        s.pointer_up(Point::new(110.0, 60.0));
        assert_eq!(s.phase(), Phase::Complete);
        assert_eq!(s.base(), Some(Rect::new(10.0, 10.0, 100.0, 50.0)));
    }

    #[test]
    fn zoom_and_border_scenario() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.set_border(5, BorderPosition::Inside);

        let r = s.set_zoom(2.0).unwrap();
        assert_eq!(r, Rect::new(-40.0, -15.0, 200.0, 100.0));

        let res = s.result().unwrap();
        assert_eq!((res.x1, res.y1, res.x2, res.y2), (-35, -10, 155, 80));
        assert_eq!(res.zoom, 2.0);
        assert_eq!(res.border_width, 5);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.zoom_in();
        s.reset();

        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.base().is_none());
        assert!(s.result().is_none());
        assert_eq!(s.zoom(), Zoom::ONE);
        assert_eq!(s.controls(), Controls::default());
        assert!(matches!(s.confirm(), Err(BoxselError::NoSelection)));
    }

    #[test]
    fn resize_via_corner_handle() {
        let mut s = SelectionSession::init(
            SessionDefaults::default(),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        s.pointer_down(Point::new(0.0, 0.0));
        assert_eq!(s.phase(), Phase::Resizing);
        assert_eq!(s.active_resize().map(|r| r.edge), Some(Edge::TopLeft));

        s.pointer_move(Point::new(10.0, 10.0));
        s.pointer_up(Point::new(20.0, 20.0));
        assert_eq!(s.phase(), Phase::Complete);
        assert_eq!(s.base(), Some(Rect::new(20.0, 20.0, 80.0, 80.0)));
    }

    #[test]
    fn right_handle_rejects_collapse() {
        let mut s = SelectionSession::init(
            SessionDefaults::default(),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        s.pointer_down(Point::new(100.0, 50.0));
        assert_eq!(s.active_resize().map(|r| r.edge), Some(Edge::Right));

        s.pointer_move(Point::new(40.0, 50.0));
        assert_eq!(s.base().unwrap().width, 40.0);

        s.pointer_move(Point::new(-20.0, 50.0));
        assert_eq!(s.base().unwrap().width, 40.0);
    }

    #[test]
    fn drag_inside_moves() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.pointer_down(Point::new(60.0, 35.0));
        assert_eq!(s.phase(), Phase::Moving);
        s.pointer_up(Point::new(70.0, 45.0));
        assert_eq!(s.base(), Some(Rect::new(20.0, 20.0, 100.0, 50.0)));
    }

    #[test]
    fn pointer_down_outside_starts_new_drawing() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.pointer_down(Point::new(300.0, 300.0));
        assert_eq!(s.phase(), Phase::Drawing);
        s.pointer_up(Point::new(320.0, 310.0));
        assert_eq!(s.base(), Some(Rect::new(300.0, 300.0, 20.0, 10.0)));
    }

    #[test]
    fn zoom_ignored_without_selection() {
        let mut s = SelectionSession::default();
        assert!(s.set_zoom(2.0).is_none());
        assert_eq!(s.zoom(), Zoom::ONE);
    }

    #[test]
    fn metadata_round_trips() {
        let mut s = drawn((13.0, 17.0), (140.0, 99.0));
        s.set_border(7, BorderPosition::Outside);
        s.set_zoom(1.75);
        let before = s.result().unwrap();

        let json = s.metadata().to_json().unwrap();
        let mut restored = SelectionSession::default();
        restored.load_json(&json).unwrap();

        assert_eq!(restored.result().unwrap(), before);
        assert_eq!(restored.metadata(), s.metadata());
    }

    #[test]
    fn result_layout_round_trips() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.set_zoom(2.0);
        let before = s.result().unwrap();

        let json = serde_json::to_string(&before).unwrap();
        let mut restored = SelectionSession::default();
        assert!(restored.load_json(&json).unwrap().is_some());

        assert_eq!(restored.phase(), Phase::Complete);
        assert_eq!(restored.result(), Some(before));
        assert_eq!(restored.base(), s.base());
    }

    #[test]
    fn base_layout_round_trips() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.set_zoom(1.5);
        s.set_border(4, BorderPosition::Outside);
        let before = s.result().unwrap();

        let json = serde_json::to_string(&s.base_coordinates().unwrap()).unwrap();
        let mut restored = SelectionSession::default();
        assert!(restored.load_json(&json).unwrap().is_some());

        assert_eq!(restored.result(), Some(before));
        assert_eq!(restored.border(), BorderSpec::new(4, BorderPosition::Outside));
    }

    #[test]
    fn unselected_metadata_resets() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.load(&RegionMetadata::default()).unwrap();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.border().width, 0);
    }

    #[test]
    fn controls_follow_zoom_bounds() {
        let mut s = drawn((10.0, 10.0), (110.0, 60.0));
        s.set_zoom(4.0);
        let c = s.controls();
        assert!(!c.zoom_in && c.zoom_out && c.reset && c.confirm);
    }
}
