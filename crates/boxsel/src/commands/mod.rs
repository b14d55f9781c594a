// Author: Dustin Pilgrim
// License: MIT

pub mod print;
pub mod run;
mod select;
