// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::{DEFAULT_ENABLE_LIST, DEFAULT_OUT_DIR, FAIL_MARK, FETCH_TIMEOUT_SECS, PASS_MARK};
use crate::config::options::RunOptions;
use crate::core::net::HttpFetcher;
use crate::progress::Progress;
use crate::registry::Target;
use crate::runner;

/// Check that sportsbook sites still expose their expected page elements.
#[derive(Debug, Parser)]
#[command(name = "diago", version, about)]
pub struct Cli {
    /// Enable-list: one `name url` pair per line, `#` starts a comment
    #[arg(short, long, default_value = DEFAULT_ENABLE_LIST)]
    pub enable_list: PathBuf,

    /// Directory for report.json, report.md and latest_report.md
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub output_dir: PathBuf,

    /// Directory of `<name>/config.yaml` selector configs
    #[arg(short, long)]
    pub configs_dir: Option<PathBuf>,

    /// Maximum concurrent fetches (default: one per target)
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Skip writing latest_report.md
    #[arg(long)]
    pub no_latest: bool,

    /// Also append logs to <output-dir>/debug.log
    #[arg(long)]
    pub debug_log: bool,

    /// List registered targets and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            enable_list: self.enable_list.clone(),
            out_dir: self.output_dir.clone(),
            configs_dir: self.configs_dir.clone(),
            concurrency: self.concurrency.map(usize::from),
            timeout: Duration::from_secs(self.timeout),
            write_latest_snippet: !self.no_latest,
        }
    }
}

/// Prints one line per finished target.
struct CliProgress {
    total: usize,
    done: usize,
}

impl CliProgress {
    fn line(&mut self, mark: &str, name: &str) {
        self.done += 1;
        println!("[{}/{}] {mark} {name}", self.done, self.total);
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("🌐 Fetching and verifying {total} target(s)...");
    }
    fn target_done(&mut self, name: &str) {
        self.line(PASS_MARK, name);
    }
    fn target_failed(&mut self, name: &str) {
        self.line(FAIL_MARK, name);
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let opts = cli.options();
    let debug_log = cli.debug_log.then(|| opts.debug_log_path());
    crate::log::init(debug_log.as_deref()).wrap_err("failed to set up logging")?;

    let mut registry = runner::build_registry(&opts)?;

    if cli.list {
        let mut names: Vec<&str> = registry.all_registered().into_iter().map(Target::name).collect();
        names.sort_unstable();
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let fetcher = HttpFetcher::with_timeout(opts.timeout).wrap_err("failed to build HTTP client")?;
    let mut progress = CliProgress { total: 0, done: 0 };
    let summary = runner::run(&opts, &mut registry, &fetcher, Some(&mut progress))?;

    for path in &summary.files_written {
        println!("📄 {}", path.display());
    }
    let failed = summary.report.failed().count();
    if failed == 0 {
        println!("{PASS_MARK} Verification complete: all {} target(s) passed", summary.report.len());
    } else {
        println!("{FAIL_MARK} Verification complete: {failed} of {} target(s) failed", summary.report.len());
    }
    Ok(())
}
