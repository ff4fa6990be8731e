//! Command-line interface: argument parsing and option enums.

mod args;
mod enums;

pub use args::Args;
pub use enums::{ColorSpace, ScaleModeArg};
