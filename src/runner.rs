// src/runner.rs
use std::path::PathBuf;

use crate::{
    bookies,
    config::{options::RunOptions, target_config},
    core::net::Fetch,
    engine::run_all,
    error::{ConfigError, RunError},
    progress::Progress,
    registry::{Registry, ResolutionWarning},
    report::{self, FullReport},
};

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: FullReport,
    pub warnings: Vec<ResolutionWarning>,
    pub files_written: Vec<PathBuf>,
}

/// Built-in targets, then any YAML configs on top (same name replaces).
pub fn build_registry(opts: &RunOptions) -> Result<Registry, ConfigError> {
    let mut registry = Registry::new();
    bookies::register_builtin(&mut registry);
    if let Some(dir) = &opts.configs_dir {
        for target in target_config::load_configs_dir(dir)? {
            registry.register(target);
        }
    }
    Ok(registry)
}

/// Resolve the enable-list, verify every enabled target, persist reports.
///
/// Per-target failures end up inside the report. Only an unreadable
/// enable-list or a failed report write makes this return `Err`.
/// An empty enabled set still writes (empty) reports.
pub fn run(
    opts: &RunOptions,
    registry: &mut Registry,
    fetcher: &dyn Fetch,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let resolution = registry.resolve_enabled_file(&opts.enable_list)?;
    if resolution.targets.is_empty() {
        logw!("no enabled targets found in {}", opts.enable_list.display());
    }

    let report = run_all(&resolution.targets, fetcher, opts.concurrency, progress);
    registry.record_run(&report);

    let passed = report.details.iter().filter(|r| r.all_pass).count();
    logf!("{passed}/{} target(s) passed", report.len());

    let files_written = report::save(&report, &opts.report_paths())?;

    Ok(RunSummary { report, warnings: resolution.warnings, files_written })
}
