// Author: Dustin Pilgrim
// License: MIT

pub mod dialog;
pub mod error;
pub mod node;
pub mod ready;
pub mod widget;

pub use dialog::{HostNode, ImageRef, MetadataField, NodeDialog};
pub use error::{HostError, Result};
pub use node::RegionSelectorNode;
pub use ready::{ReadySignal, ReadyWaiter, DEFAULT_READY_TIMEOUT};
pub use widget::SelectorWidget;
