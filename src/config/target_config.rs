// src/config/target_config.rs
//! Per-target YAML selector configs.
//!
//! Layout on disk: `<configs-dir>/<lowercase name>/config.yaml`
//!
//! ```yaml
//! name: betika
//! selectors:
//!   login:
//!     username_input: input#username
//!     password_input: ""        # skipped
//!   odds_selector:
//!     moneyline: div.match-result
//! bet_button: button#placeBet
//! bet_history: div#betHistory
//! ```
//!
//! Keys the verifier has no use for (credentials, timeouts, betting, the
//! base URL) are accepted and ignored. URLs come from the enable-list.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use super::consts::TARGET_CONFIG_FILE;
use crate::bookies::sportsbook_tree;
use crate::engine::tree::{SelectorNode, SelectorTree};
use crate::error::ConfigError;
use crate::registry::Target;

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    selectors: Option<Value>,
    #[serde(default)]
    bet_button: Option<String>,
    #[serde(default)]
    bet_history: Option<String>,
}

/// Parse one config document. `fallback_name` is used when the file has
/// no `name:` key. A missing or null `selectors:` means the default
/// [`sportsbook_tree`] layout; `bet_button`/`bet_history` replace its
/// top-level selectors.
pub fn parse_target_config(text: &str, fallback_name: &str, path: &Path) -> Result<Target, ConfigError> {
    let raw: RawConfig = serde_yaml::from_str(text)
        .map_err(|e| ConfigError::Yaml { path: path.to_path_buf(), source: e })?;

    let mut tree = match &raw.selectors {
        None => sportsbook_tree(),
        Some(v @ Value::Mapping(_)) => {
            let selectors = SelectorNode::from_yaml(v)?;
            selectors.validate()?;
            SelectorTree::new(selectors)
        }
        Some(_) => return Err(ConfigError::Shape { label: s!("selectors"), found: "non-mapping root" }),
    };
    if let Some(sel) = raw.bet_button {
        tree = tree.with_top_level("BetButton", sel);
    }
    if let Some(sel) = raw.bet_history {
        tree = tree.with_top_level("BetHistory", sel);
    }

    let name = raw.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(fallback_name);
    Ok(Target::tree(name, tree))
}

pub fn load_target_config(path: &Path) -> Result<Target, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigError::Read { path: path.to_path_buf(), source: e })?;
    let fallback = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_target_config(&text, &fallback, path)
}

/// Load every `<dir>/<name>/config.yaml`, sorted by directory name.
///
/// A single bad config is logged and skipped; only an unreadable `dir`
/// is an error.
pub fn load_configs_dir(dir: &Path) -> Result<Vec<Target>, ConfigError> {
    let read_err = |e: std::io::Error| ConfigError::Read { path: dir.to_path_buf(), source: e };

    let mut config_paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let cfg = path.join(TARGET_CONFIG_FILE);
        if path.is_dir() && cfg.is_file() {
            config_paths.push(cfg);
        }
    }
    config_paths.sort();

    let mut targets = Vec::with_capacity(config_paths.len());
    for path in config_paths {
        match load_target_config(&path) {
            Ok(t) => targets.push(t),
            Err(e) => logw!("skipping {}: {e}", path.display()),
        }
    }
    logf!("loaded {} target config(s) from {}", targets.len(), dir.display());
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Check;

    const BETIKA: &str = r#"
name: Betika
base_url: https://betika.example.com
username: user1
selectors:
  login:
    username_input: input#username
    password_input: ""
  odds_selector:
    moneyline: div.match-result
bet_button: button#placeBet
timeout:
  page_load: 5000
"#;

    #[test]
    fn parses_tree_and_top_level() {
        let t = parse_target_config(BETIKA, "ignored", Path::new("betika/config.yaml")).unwrap();
        assert_eq!(t.name(), "betika");
        assert_eq!(t.url(), "");
        let Check::Tree(tree) = &t.check else { panic!("expected tree check") };
        assert_eq!(tree.selectors.configured_leaves(), 2);
        assert_eq!(tree.top_level, vec![(s!("BetButton"), s!("button#placeBet"))]);
    }

    #[test]
    fn missing_name_falls_back_to_directory() {
        let t = parse_target_config("selectors: {}\n", "kwikbet", Path::new("x")).unwrap();
        assert_eq!(t.name(), "kwikbet");
    }

    #[test]
    fn missing_selectors_use_default_layout() {
        let t = parse_target_config("name: kwikbet\nbet_button: a.bet-now\n", "x", Path::new("x")).unwrap();
        let Check::Tree(tree) = &t.check else { panic!("expected tree check") };
        let default = sportsbook_tree();
        assert_eq!(tree.selectors, default.selectors);
        assert_eq!(
            tree.top_level,
            vec![(s!("BetButton"), s!("a.bet-now")), (s!("BetHistory"), s!("div#betHistory"))]
        );
    }

    #[test]
    fn scalar_selectors_root_is_rejected() {
        let err = parse_target_config("selectors: input#u\n", "x", Path::new("x")).unwrap_err();
        assert!(matches!(err, ConfigError::Shape { .. }));
    }

    #[test]
    fn configs_dir_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in [("betika", BETIKA), ("broken", "selectors: [1, 2\n")] {
            let sub = dir.path().join(name);
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join(TARGET_CONFIG_FILE), body).unwrap();
        }
        fs::create_dir_all(dir.path().join("empty")).unwrap();

        let targets = load_configs_dir(dir.path()).unwrap();
        let names: Vec<&str> = targets.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["betika"]);
    }
}
