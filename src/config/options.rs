// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

/// Everything a run needs to know that isn't a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub enable_list: PathBuf,
    pub out_dir: PathBuf,
    /// Directory of `<name>/config.yaml` selector trees, registered on top
    /// of the built-in targets.
    pub configs_dir: Option<PathBuf>,
    /// Upper bound on worker threads. `None` means one per target.
    pub concurrency: Option<usize>,
    pub timeout: Duration,
    pub write_latest_snippet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            enable_list: PathBuf::from(DEFAULT_ENABLE_LIST),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            configs_dir: None,
            concurrency: None,
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            write_latest_snippet: true,
        }
    }
}

/// Where the report encodings land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
    pub latest: Option<PathBuf>,
}

impl RunOptions {
    pub fn report_paths(&self) -> ReportPaths {
        ReportPaths::in_dir(&self.out_dir, self.write_latest_snippet)
    }

    pub fn debug_log_path(&self) -> PathBuf {
        self.out_dir.join(DEBUG_LOG)
    }
}

impl ReportPaths {
    pub fn in_dir(dir: &Path, with_latest: bool) -> Self {
        Self {
            json: dir.join(REPORT_JSON),
            markdown: dir.join(REPORT_MD),
            latest: with_latest.then(|| dir.join(LATEST_SNIPPET_MD)),
        }
    }
}
