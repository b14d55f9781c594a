// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use boxsel_core::RegionMetadata;
use eventline::{debug, error, info, warn};

use crate::error::{HostError, Result};
use crate::ready::ReadyWaiter;
use crate::widget::SelectorWidget;

/// Name of the node widget that holds the input image file name.
pub const IMAGE_WIDGET: &str = "image";

/// Name of the node widget that persists the selection.
pub const METADATA_WIDGET: &str = "region_metadata";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetValue {
    pub name: String,
    pub value: String,
}

/// A host graph node as the dialog sees it: named string widgets and,
/// when its image input is linked, the upstream node.
#[derive(Debug, Clone, Default)]
pub struct HostNode {
    pub id: u32,
    pub widgets: Vec<WidgetValue>,
    pub source: Option<Box<HostNode>>,
}

impl HostNode {
    pub fn widget(&self, name: &str) -> Option<&str> {
        self.widgets
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.value.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn with_widget(mut self, name: &str, value: &str) -> Self {
        self.widgets.push(WidgetValue {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }
}

/// Input image picked for the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub file_name: String,
}

impl ImageRef {
    /// Host view URL for an input-folder image.
    pub fn url(&self) -> String {
        format!("/view?filename={}&type=input", self.file_name)
    }
}

/// Linked upstream node first, then the node's own image widget.
pub fn resolve_image(node: &HostNode) -> Result<ImageRef> {
    let from_source = node.source.as_deref().and_then(|src| {
        let name = src.widget(IMAGE_WIDGET);
        if name.is_some() {
            debug!("image from source node {}", src.id);
        }
        name
    });

    from_source
        .or_else(|| node.widget(IMAGE_WIDGET))
        .map(|file_name| ImageRef {
            file_name: file_name.to_string(),
        })
        .ok_or(HostError::NoImage)
}

/// Host-persisted string the confirmed metadata is written into.
pub trait MetadataField {
    fn write(&mut self, value: &str);

    /// Called after every write so the host can mark the node dirty.
    fn changed(&mut self) {}
}

impl MetadataField for String {
    fn write(&mut self, value: &str) {
        self.clear();
        self.push_str(value);
    }
}

impl MetadataField for HostNode {
    fn write(&mut self, value: &str) {
        match self.widgets.iter().position(|w| w.name == METADATA_WIDGET) {
            Some(i) => self.widgets[i].value = value.to_string(),
            None => warn!(
                "{} widget not found on node {}, available: {:?}",
                METADATA_WIDGET,
                self.id,
                self.widgets.iter().map(|w| w.name.as_str()).collect::<Vec<_>>()
            ),
        }
    }
}

enum Selector {
    Loading(ReadyWaiter<SelectorWidget>),
    Ready(SelectorWidget),
    Failed { waited: Duration },
}

/// Selection dialog embedded in a host node.
pub struct NodeDialog {
    node_id: u32,
    image: ImageRef,
    saved: Option<String>,
    selector: Selector,
}

impl NodeDialog {
    pub fn open(node: &HostNode, selector: ReadyWaiter<SelectorWidget>) -> Result<Self> {
        info!("opening dialog for node {}", node.id);
        let image = resolve_image(node)?;
        debug!("image url: {}", image.url());

        Ok(Self {
            node_id: node.id,
            image,
            saved: node.widget(METADATA_WIDGET).map(str::to_string),
            selector: Selector::Loading(selector),
        })
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.selector, Selector::Ready(_))
    }

    /// Blocks until the selector signals readiness, then points it at the
    /// dialog's image and restores the node's saved selection, if any.
    /// After a timeout the dialog stays unusable.
    pub fn wait_ready(&mut self, timeout: Duration) -> Result<&mut SelectorWidget> {
        let failed = Selector::Failed { waited: timeout };
        self.selector = match std::mem::replace(&mut self.selector, failed) {
            Selector::Loading(waiter) => match waiter.wait_blocking(timeout) {
                Ok(mut widget) => {
                    widget.set_image(self.image.url(), || true);
                    if let Some(json) = self.saved.as_deref() {
                        restore(&mut widget, json);
                    }
                    info!("selector ready for node {}", self.node_id);
                    Selector::Ready(widget)
                }
                Err(e) => {
                    error!("selector failed to load: {e}");
                    return Err(e);
                }
            },
            other => other,
        };

        match &mut self.selector {
            Selector::Ready(widget) => Ok(widget),
            Selector::Failed { waited } => Err(HostError::NotReady { waited: *waited }),
            Selector::Loading(_) => Err(HostError::SelectorLoading),
        }
    }

    pub fn selector_mut(&mut self) -> Option<&mut SelectorWidget> {
        match &mut self.selector {
            Selector::Ready(widget) => Some(widget),
            _ => None,
        }
    }

    /// Writes the confirmed selection into `field` as metadata JSON.
    pub fn confirm(&mut self, field: &mut impl MetadataField) -> Result<RegionMetadata> {
        let widget = match &mut self.selector {
            Selector::Ready(widget) => widget,
            Selector::Loading(_) => {
                warn!("confirm clicked before the selector was ready");
                return Err(HostError::SelectorLoading);
            }
            Selector::Failed { waited } => {
                warn!("confirm clicked on a selector that never loaded");
                return Err(HostError::NotReady { waited: *waited });
            }
        };

        widget.confirm()?;
        let metadata = widget.session().metadata();
        let json = metadata.to_json()?;

        field.write(&json);
        field.changed();
        info!("metadata widget updated with: {}", json);
        Ok(metadata)
    }

    pub fn cancel(mut self) {
        if let Some(widget) = self.selector_mut() {
            widget.cancel();
        }
        debug!("dialog cancelled");
    }
}

/// Stored metadata that no longer parses is dropped, not fatal.
fn restore(widget: &mut SelectorWidget, json: &str) {
    let loaded = RegionMetadata::from_json(json)
        .map_err(HostError::from)
        .and_then(|m| widget.load_coordinates(&m));

    match loaded {
        Ok(Some(_)) => debug!("restored saved selection"),
        Ok(None) => {}
        Err(e) => warn!("ignoring saved metadata: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use boxsel_core::Point;

    use super::*;
    use crate::ready;

    fn node_with_image() -> HostNode {
        HostNode {
            id: 4,
            ..HostNode::default()
        }
        .with_widget(IMAGE_WIDGET, "cat.png")
    }

    #[test]
    fn prefers_linked_source_image() {
        let mut node = node_with_image();
        node.source = Some(Box::new(
            HostNode {
                id: 1,
                ..HostNode::default()
            }
            .with_widget(IMAGE_WIDGET, "upstream.png"),
        ));

        assert_eq!(resolve_image(&node).unwrap().file_name, "upstream.png");
    }

    #[test]
    fn missing_image_is_a_notice() {
        let node = HostNode::default().with_widget(IMAGE_WIDGET, "");
        assert!(matches!(resolve_image(&node), Err(HostError::NoImage)));
    }

    #[test]
    fn confirm_before_ready_is_rejected() {
        let (_signal, waiter) = ready::channel();
        let mut dialog = NodeDialog::open(&node_with_image(), waiter).unwrap();

        let mut field = String::from("{}");
        assert!(matches!(dialog.confirm(&mut field), Err(HostError::SelectorLoading)));
        assert_eq!(field, "{}");
    }

    #[test]
    fn timeout_leaves_dialog_failed() {
        let (_signal, waiter) = ready::channel();
        let mut dialog = NodeDialog::open(&node_with_image(), waiter).unwrap();

        assert!(matches!(
            dialog.wait_ready(Duration::from_millis(20)),
            Err(HostError::NotReady { .. })
        ));
        assert!(!dialog.is_ready());

        let mut field = String::new();
        match dialog.confirm(&mut field) {
            Err(HostError::NotReady { waited }) => {
                assert_eq!(waited, Duration::from_millis(20))
            }
            other => panic!("unexpected confirm outcome: {other:?}"),
        }
        assert!(field.is_empty());

        // A later wait cannot revive it either.
        assert!(matches!(
            dialog.wait_ready(Duration::from_secs(1)),
            Err(HostError::NotReady { waited }) if waited == Duration::from_millis(20)
        ));
    }

    #[test]
    fn confirm_writes_selected_metadata() {
        let (signal, waiter) = ready::channel();
        let mut dialog = NodeDialog::open(&node_with_image(), waiter).unwrap();
        signal.fire(SelectorWidget::default());

        let widget = dialog.wait_ready(Duration::from_secs(1)).unwrap();
        assert_eq!(widget.image(), Some("/view?filename=cat.png&type=input"));

        let mut field = String::new();
        assert!(matches!(dialog.confirm(&mut field), Err(HostError::NoSelection)));
        assert!(field.is_empty());

        let session = dialog.selector_mut().unwrap().session_mut();
        session.pointer_down(Point::new(10.0, 10.0));
        session.pointer_up(Point::new(110.0, 60.0));

        let metadata = dialog.confirm(&mut field).unwrap();
        assert!(metadata.selected);

        let stored = RegionMetadata::from_json(&field).unwrap();
        assert_eq!(stored, metadata);
        assert_eq!((stored.x1, stored.y1, stored.x2, stored.y2), (13, 13, 107, 57));
    }

    #[derive(Default)]
    struct CountingField {
        value: String,
        changes: usize,
    }

    impl MetadataField for CountingField {
        fn write(&mut self, value: &str) {
            self.value = value.to_string();
        }

        fn changed(&mut self) {
            self.changes += 1;
        }
    }

    #[test]
    fn confirm_notifies_the_field() {
        let (signal, waiter) = ready::channel();
        let mut dialog = NodeDialog::open(&node_with_image(), waiter).unwrap();
        signal.fire(SelectorWidget::default());
        dialog.wait_ready(Duration::from_secs(1)).unwrap();

        let session = dialog.selector_mut().unwrap().session_mut();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_up(Point::new(40.0, 40.0));

        let mut field = CountingField::default();
        dialog.confirm(&mut field).unwrap();
        dialog.confirm(&mut field).unwrap();

        assert_eq!(field.changes, 2);
        assert!(field.value.contains("\"selected\":true"));
    }

    #[test]
    fn writes_into_node_widget_and_restores_on_reopen() {
        let mut node = node_with_image().with_widget(METADATA_WIDGET, "");

        let (signal, waiter) = ready::channel();
        let mut dialog = NodeDialog::open(&node, waiter).unwrap();
        signal.fire(SelectorWidget::default());
        let session = dialog.wait_ready(Duration::from_secs(1)).unwrap().session_mut();
        session.pointer_down(Point::new(10.0, 10.0));
        session.pointer_up(Point::new(110.0, 60.0));
        let first = dialog.confirm(&mut node).unwrap();

        assert!(node.widget(METADATA_WIDGET).is_some());

        let (signal, waiter) = ready::channel();
        let mut reopened = NodeDialog::open(&node, waiter).unwrap();
        signal.fire(SelectorWidget::default());
        let widget = reopened.wait_ready(Duration::from_secs(1)).unwrap();

        assert_eq!(widget.coordinates(), Some(first.result()));
    }

    #[test]
    fn garbage_saved_metadata_is_ignored() {
        let node = node_with_image().with_widget(METADATA_WIDGET, "{not json");

        let (signal, waiter) = ready::channel();
        let mut dialog = NodeDialog::open(&node, waiter).unwrap();
        signal.fire(SelectorWidget::default());

        let widget = dialog.wait_ready(Duration::from_secs(1)).unwrap();
        assert!(!widget.session().has_selection());
    }
}
