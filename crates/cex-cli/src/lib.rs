//! CLI library components for the content export tool.

pub mod logging;
pub mod request;
