// src/config/mod.rs

pub mod consts;
pub mod options;
pub mod target_config;

pub use options::{ReportPaths, RunOptions};
