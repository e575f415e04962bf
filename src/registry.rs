// src/registry.rs
//! Target registry and enable-list resolution.
//!
//! Phase discipline: the registry is written while registering (process
//! start) and while resolving the enable-list (before a run). During a run
//! workers only see cloned [`Target`]s, so nothing here is locked.

use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use crate::config::consts::COMMENT_PREFIX;
use crate::core::html::Document;
use crate::engine::tree::SelectorTree;
use crate::engine::types::VerificationResult;
use crate::error::InputError;
use crate::report::{FullReport, TargetReport};

/// Bespoke per-site logic for targets that are not purely tree-driven.
pub trait CustomVerifier: Send + Sync {
    fn verify(&self, target: &Target, doc: &Document) -> Vec<VerificationResult>;
}

/// How a target is checked.
#[derive(Clone)]
pub enum Check {
    Tree(SelectorTree),
    Custom(Arc<dyn CustomVerifier>),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Tree(t) => f.debug_tuple("Tree").field(t).finish(),
            Check::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetState {
    Registered,
    Enabled,
    Verified,
}

#[derive(Clone, Debug)]
pub struct Target {
    name: String,
    url: Option<String>,
    state: TargetState,
    pub check: Check,
}

impl Target {
    /// `name` is normalized to its lowercase key.
    pub fn new(name: &str, check: Check) -> Self {
        Self { name: key(name), url: None, state: TargetState::Registered, check }
    }

    pub fn tree(name: &str, tree: SelectorTree) -> Self {
        Self::new(name, Check::Tree(tree))
    }

    pub fn custom(name: &str, verifier: impl CustomVerifier + 'static) -> Self {
        Self::new(name, Check::Custom(Arc::new(verifier)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Empty until the target is enabled.
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
        self.state = TargetState::Enabled;
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.set_url(url);
        self
    }
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A dropped or merged enable-list line. Never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionWarning {
    Unregistered { line: usize, name: String },
    Malformed { line: usize, text: String },
    Duplicate { line: usize, name: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::Unregistered { line, name } => {
                write!(f, "line {line}: target '{name}' is listed but not registered")
            }
            ResolutionWarning::Malformed { line, text } => {
                write!(f, "line {line}: expected 'name url', got {text:?}")
            }
            ResolutionWarning::Duplicate { line, name } => {
                write!(f, "line {line}: target '{name}' listed again, later URL wins")
            }
        }
    }
}

/// Enabled targets in enable-list order, plus the lines that were dropped.
#[derive(Debug, Default)]
pub struct Resolution {
    pub targets: Vec<Target>,
    pub warnings: Vec<ResolutionWarning>,
}

/// One parsed enable-list line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnableLine<'a> {
    Skip,
    Entry { name: &'a str, url: &'a str },
    Malformed,
}

/// `name url`, separated by ASCII whitespace. Blank and `#` lines are skipped.
pub fn parse_enable_line(line: &str) -> EnableLine<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return EnableLine::Skip;
    }
    let mut fields = line.split_ascii_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(url), None) => EnableLine::Entry { name, url },
        _ => EnableLine::Malformed,
    }
}

#[derive(Default)]
pub struct Registry {
    targets: HashMap<String, Target>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by name; the last registration wins.
    pub fn register(&mut self, target: Target) {
        if self.targets.contains_key(target.name()) {
            logd!("re-registering target '{}'", target.name());
        }
        self.targets.insert(target.name.clone(), target);
    }

    pub fn lookup(&self, name: &str) -> Option<&Target> {
        self.targets.get(&key(name))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Unordered snapshot; for listing only.
    pub fn all_registered(&self) -> Vec<&Target> {
        self.targets.values().collect()
    }

    /// Resolve an enable-list read from `reader`.
    ///
    /// Bad lines never abort: unknown names and malformed lines are logged
    /// and dropped. Only an unreadable source is an error. A name listed
    /// twice keeps its first position and takes the later URL.
    pub fn resolve_enabled<R: BufRead>(&mut self, reader: R, source: &Path) -> Result<Resolution, InputError> {
        let mut out = Resolution::default();
        let mut position: HashMap<String, usize> = HashMap::new();

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| InputError { path: source.to_path_buf(), source: e })?;

            let (name, url) = match parse_enable_line(&line) {
                EnableLine::Skip => continue,
                EnableLine::Entry { name, url } => (key(name), url),
                EnableLine::Malformed => {
                    let w = ResolutionWarning::Malformed { line: line_no, text: s!(line.trim()) };
                    logw!("{}: {w}", source.display());
                    out.warnings.push(w);
                    continue;
                }
            };

            let Some(target) = self.targets.get_mut(&name) else {
                let w = ResolutionWarning::Unregistered { line: line_no, name };
                logw!("{}: {w}", source.display());
                out.warnings.push(w);
                continue;
            };
            target.set_url(url);

            let seen = position.get(&name).copied();
            match seen {
                Some(idx) => {
                    let w = ResolutionWarning::Duplicate { line: line_no, name };
                    logw!("{}: {w}", source.display());
                    out.warnings.push(w);
                    out.targets[idx] = target.clone();
                }
                None => {
                    position.insert(name, out.targets.len());
                    out.targets.push(target.clone());
                }
            }
        }

        logf!("resolved {} enabled target(s) from {}", out.targets.len(), source.display());
        Ok(out)
    }

    /// [`Registry::resolve_enabled`] over a file on disk.
    pub fn resolve_enabled_file(&mut self, path: &Path) -> Result<Resolution, InputError> {
        let file = std::fs::File::open(path)
            .map_err(|e| InputError { path: path.to_path_buf(), source: e })?;
        self.resolve_enabled(std::io::BufReader::new(file), path)
    }

    /// Mark every reported target as verified.
    pub fn record_run(&mut self, report: &FullReport) {
        for TargetReport { name, .. } in &report.details {
            if let Some(t) = self.targets.get_mut(name) {
                t.state = TargetState::Verified;
            }
        }
    }
}
