// Author: Dustin Pilgrim
// License: MIT

pub mod border;
pub mod edge;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod metadata;
pub mod rect;
pub mod session;
pub mod zoom;

pub use border::{BorderPosition, BorderSpec};
pub use edge::Edge;
pub use error::BoxselError;
pub use geometry::{Geometry, MoveSession, ResizeSession, MIN_SIZE};
pub use hit::{HitTarget, HANDLE_HIT};
pub use metadata::{BaseCoordinates, RegionMetadata, SelectionResult};
pub use rect::{Bounds, PixelRegion, Point, Rect};
pub use session::{Controls, Phase, SelectionSession, SessionDefaults};
pub use zoom::Zoom;
