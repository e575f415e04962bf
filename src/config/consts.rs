// src/config/consts.rs

// Net
pub const FETCH_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; diago/",
    env!("CARGO_PKG_VERSION"),
    "; selector verification)"
);

// Inputs
pub const DEFAULT_ENABLE_LIST: &str = "bookies.txt";
pub const TARGET_CONFIG_FILE: &str = "config.yaml";
pub const COMMENT_PREFIX: char = '#';

// Reports
pub const DEFAULT_OUT_DIR: &str = "EMC";
pub const REPORT_JSON: &str = "report.json";
pub const REPORT_MD: &str = "report.md";
pub const LATEST_SNIPPET_MD: &str = "latest_report.md";
pub const DEBUG_LOG: &str = "debug.log";

// Status markers used in both report encodings
pub const PASS_MARK: &str = "✅";
pub const FAIL_MARK: &str = "❌";
