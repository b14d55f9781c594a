// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use boxsel_core::BoxselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

/// Everything the host shell may have to show the user.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("box selector failed to load after {waited:?}")]
    NotReady { waited: Duration },

    #[error("please wait for the selector to load")]
    SelectorLoading,

    #[error("no image connected to the node; connect an image from a LoadImage node")]
    NoImage,

    #[error("no selection made")]
    NoSelection,

    #[error(transparent)]
    Core(#[from] BoxselError),
}
