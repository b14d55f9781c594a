// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;
use std::thread;
use std::time::Duration;

use boxsel_core::{SelectionSession, SessionDefaults};
use boxsel_host::ready;
use boxsel_host::{HostNode, NodeDialog, RegionSelectorNode, SelectorWidget};
use boxsel_host::dialog::{IMAGE_WIDGET, METADATA_WIDGET};
use eventline::{debug, info, warn};

use crate::cli::Layout;
use crate::script::{self, ScriptLine};

use super::print;

/// Plain session: replay the script and print in the requested layout.
pub fn standalone(
    defaults: SessionDefaults,
    script: &[ScriptLine],
    layout: Layout,
    image_size: Option<(u32, u32)>,
) -> Result<(), String> {
    let mut session = SelectionSession::new(defaults);
    script::apply(&mut session, script)?;

    if let (Some(base), Some((w, h))) = (session.base(), image_size) {
        let [px, py, pw, ph] = print::percentages(base, w, h);
        info!("selection: x={:.2}% y={:.2}% w={:.2}% h={:.2}%", px, py, pw, ph);
    }

    println!("{}", layout_json(&session, layout)?);
    Ok(())
}

/// The session in the requested layout. Every layout loads back through
/// `--metadata`.
pub(super) fn layout_json(session: &SelectionSession, layout: Layout) -> Result<String, String> {
    match layout {
        Layout::Bounds => {
            let result = session.confirm().map_err(|e| e.to_string())?;
            print::to_json(&result)
        }
        Layout::Base => {
            let coords = session
                .base_coordinates()
                .ok_or_else(|| "no selection".to_string())?;
            print::to_json(&coords)
        }
        Layout::Metadata => print::to_json(&session.metadata()),
    }
}

/// Same script, driven through the node dialog: the selector is built on a
/// loader thread and announced through the readiness signal, the confirmed
/// metadata is written to the node's metadata widget and then passed through
/// the region-selector node.
pub fn via_dialog(
    defaults: SessionDefaults,
    script: &[ScriptLine],
    image: &Path,
    ready_timeout: Duration,
) -> Result<(), String> {
    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| format!("not a file: {}", image.display()))?;

    let mut node = HostNode {
        id: 1,
        ..HostNode::default()
    }
    .with_widget(IMAGE_WIDGET, &file_name)
    .with_widget(METADATA_WIDGET, "");

    let (signal, waiter) = ready::channel();
    let mut dialog = NodeDialog::open(&node, waiter).map_err(|e| e.to_string())?;

    let loader = thread::spawn(move || {
        let mut widget = SelectorWidget::new(defaults);
        widget.init(
            |r| {
                debug!("confirm callback: {:?}", r);
            },
            || {
                debug!("cancel callback");
            },
        );
        signal.fire(widget);
    });

    let widget = dialog.wait_ready(ready_timeout).map_err(|e| e.to_string())?;
    script::apply(widget.session_mut(), script)?;

    if loader.join().is_err() {
        warn!("selector loader thread panicked");
    }

    dialog.confirm(&mut node).map_err(|e| e.to_string())?;

    let mut region_node = RegionSelectorNode::new();
    let ((), out) = region_node.process((), node.widget(METADATA_WIDGET));
    println!("{out}");

    Ok(())
}
