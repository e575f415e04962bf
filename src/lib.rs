// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod bookies;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod file;
pub mod progress;
pub mod registry;
pub mod report;
pub mod runner;

pub use crate::core::{Document, Fetch};
pub use crate::engine::{SelectorNode, SelectorTree, VerificationResult};
pub use crate::registry::{Registry, Target};
pub use crate::report::{FullReport, TargetReport};
