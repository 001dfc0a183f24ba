//! 功能元件模組

pub mod timelapse_builder;

pub use timelapse_builder::TimelapseBuilder;
