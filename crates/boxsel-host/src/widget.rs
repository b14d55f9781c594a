// Author: Dustin Pilgrim
// License: MIT

use boxsel_core::{
    BoxselError, Rect, RegionMetadata, SelectionResult, SelectionSession, SessionDefaults,
};
use eventline::{debug, info};

use crate::error::{HostError, Result};

type ConfirmFn = Box<dyn FnMut(&SelectionResult) + Send>;
type CancelFn = Box<dyn FnMut() + Send>;

/// Standalone embeddable selector: one session over one background image,
/// reporting through host callbacks.
pub struct SelectorWidget {
    session: SelectionSession,
    image: Option<String>,
    on_confirm: Option<ConfirmFn>,
    on_cancel: Option<CancelFn>,
}

impl SelectorWidget {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            session: SelectionSession::new(defaults),
            image: None,
            on_confirm: None,
            on_cancel: None,
        }
    }

    /// Installs the host callbacks, replacing any previous ones.
    pub fn init<C, X>(&mut self, on_confirm: C, on_cancel: X)
    where
        C: FnMut(&SelectionResult) + Send + 'static,
        X: FnMut() + Send + 'static,
    {
        self.on_confirm = Some(Box::new(on_confirm));
        self.on_cancel = Some(Box::new(on_cancel));
    }

    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SelectionSession {
        &mut self.session
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Swaps the background image. An existing selection is discarded, but
    /// only if `confirm_discard` agrees; returns whether the image changed.
    pub fn set_image<F>(&mut self, url: impl Into<String>, confirm_discard: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if self.session.has_selection() {
            if !confirm_discard() {
                debug!("image change declined, keeping selection");
                return false;
            }
            self.session.reset();
        }

        let url = url.into();
        debug!("background image: {}", url);
        self.image = Some(url);
        true
    }

    pub fn coordinates(&self) -> Option<SelectionResult> {
        self.session.result()
    }

    pub fn load_coordinates(&mut self, metadata: &RegionMetadata) -> Result<Option<Rect>> {
        Ok(self.session.load(metadata)?)
    }

    pub fn confirm(&mut self) -> Result<SelectionResult> {
        let result = self.session.confirm().map_err(|e| match e {
            BoxselError::NoSelection => HostError::NoSelection,
            other => HostError::Core(other),
        })?;

        info!("coordinates confirmed: {:?}", result);
        if let Some(cb) = self.on_confirm.as_mut() {
            cb(&result);
        }
        Ok(result)
    }

    /// Leaves closing the surrounding dialog to the callback.
    pub fn cancel(&mut self) {
        debug!("selection cancelled");
        if let Some(cb) = self.on_cancel.as_mut() {
            cb();
        }
    }
}

impl Default for SelectorWidget {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use boxsel_core::Point;

    use super::*;

    fn draw(w: &mut SelectorWidget) {
        let s = w.session_mut();
        s.pointer_down(Point::new(10.0, 10.0));
        s.pointer_up(Point::new(110.0, 60.0));
    }

    #[test]
    fn confirm_without_selection_is_a_notice() {
        let mut w = SelectorWidget::default();
        assert!(matches!(w.confirm(), Err(HostError::NoSelection)));
    }

    #[test]
    fn confirm_invokes_callback() {
        let seen = Arc::new(Mutex::new(None));
        let cancelled = Arc::new(Mutex::new(false));

        let mut w = SelectorWidget::default();
        {
            let seen = seen.clone();
            let cancelled = cancelled.clone();
            w.init(
                move |r| *seen.lock().unwrap() = Some(*r),
                move || *cancelled.lock().unwrap() = true,
            );
        }

        draw(&mut w);
        let r = w.confirm().unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(r));
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (13, 13, 107, 57));

        w.cancel();
        assert!(*cancelled.lock().unwrap());
    }

    #[test]
    fn image_change_respects_confirmation() {
        let mut w = SelectorWidget::default();
        assert!(w.set_image("/view?filename=a.png&type=input", || false));

        draw(&mut w);
        assert!(!w.set_image("b.png", || false));
        assert!(w.session().has_selection());
        assert_eq!(w.image(), Some("/view?filename=a.png&type=input"));

        assert!(w.set_image("b.png", || true));
        assert!(!w.session().has_selection());
        assert_eq!(w.image(), Some("b.png"));
    }
}
