//! CLI library components for macrodata.

pub mod chooser;
pub mod logging;
pub mod summary;
