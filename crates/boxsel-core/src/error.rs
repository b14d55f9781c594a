// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoxselError {
    #[error("no selection")]
    NoSelection,

    #[error("invalid region metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),

    #[error("invalid border position \"{0}\" (expected inside|outside)")]
    InvalidBorderPosition(String),

    #[error("invalid resize edge \"{0}\"")]
    InvalidEdge(String),

    #[error("region metadata describes an empty rectangle")]
    EmptyRegion,
}
