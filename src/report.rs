// src/report.rs
//! Report aggregation and rendering.
//!
//! A [`FullReport`] carries the same target reports twice: `summary` feeds
//! the table, `details` the per-selector breakdown. Both are built from one
//! list, so membership and order always agree.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::consts::{FAIL_MARK, PASS_MARK};
use crate::config::options::ReportPaths;
use crate::engine::types::{Verification, VerificationResult};
use crate::error::PersistenceError;
use crate::file;

/// Label of the single result recorded when a page could not be fetched.
pub const FETCH_ERROR_LABEL: &str = "Fetch error";
/// Label of the single result recorded when verification itself blew up.
pub const VERIFIER_ERROR_LABEL: &str = "Verifier error";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    pub name: String,
    pub url: String,
    pub results: Vec<VerificationResult>,
    pub all_pass: bool,
}

impl TargetReport {
    pub fn from_verification(name: &str, url: &str, v: Verification) -> Self {
        Self { name: s!(name), url: s!(url), results: v.results, all_pass: v.all_pass }
    }

    /// The report for a target whose page never arrived.
    pub fn fetch_failed(name: &str, url: &str, reason: impl Into<String>) -> Self {
        Self::single_failure(name, url, FETCH_ERROR_LABEL, reason)
    }

    /// A report holding one diagnostic result in place of any checks.
    pub fn single_failure(name: &str, url: &str, label: &str, reason: impl Into<String>) -> Self {
        Self {
            name: s!(name),
            url: s!(url),
            results: vec![VerificationResult::diagnostic(label, reason)],
            all_pass: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullReport {
    pub summary: Vec<TargetReport>,
    pub details: Vec<TargetReport>,
}

impl FullReport {
    pub fn new(reports: Vec<TargetReport>) -> Self {
        Self { summary: reports.clone(), details: reports }
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// True iff every target passed. Vacuously true when empty.
    pub fn all_pass(&self) -> bool {
        self.details.iter().all(|r| r.all_pass)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TargetReport> {
        self.details.iter().filter(|r| !r.all_pass)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Both encodings of one report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub json: String,
    pub markdown: String,
}

pub fn render(report: &FullReport) -> Result<Rendered, PersistenceError> {
    Ok(Rendered { json: report.to_json()?, markdown: render_markdown(report) })
}

fn mark(pass: bool) -> &'static str {
    if pass { PASS_MARK } else { FAIL_MARK }
}

fn summary_table(out: &mut String, report: &FullReport) {
    out.push_str("| Bookie | URL | Status |\n");
    out.push_str("|--------|-----|--------|\n");
    for r in &report.summary {
        let _ = writeln!(out, "| {} | {} | {} |", r.name, r.url, mark(r.all_pass));
    }
}

/// Summary table, one section per target, then the overall line.
/// Section order follows `details`.
pub fn render_markdown(report: &FullReport) -> String {
    let mut out = s!("# Verification Report\n\n");
    out.push_str("## 📊 Summary\n");
    summary_table(&mut out, report);

    out.push_str("\n---\n\n");
    for d in &report.details {
        let _ = writeln!(out, "## {} ({})", d.name, d.url);
        for res in &d.results {
            let _ = writeln!(out, "- {}: {}", res.label, res.status);
        }
        let overall = if d.all_pass { "✅ Passed" } else { "❌ Failed" };
        let _ = writeln!(out, "Overall: {overall}\n");
    }

    let passed = report.details.iter().filter(|r| r.all_pass).count();
    let _ = writeln!(
        out,
        "**Result: {} {}/{} targets passed**",
        mark(report.all_pass()),
        passed,
        report.len()
    );
    out
}

/// Summary table only, for embedding in a README or CI page.
pub fn render_latest_snippet(report: &FullReport) -> String {
    let mut out = s!("## 📊 Summary\n");
    summary_table(&mut out, report);
    out.push_str("\n_Updated automatically via GitHub Actions_\n");
    out
}

/// Write every encoding in `paths`. Stops at the first failure; files
/// already written stay on disk.
pub fn save(report: &FullReport, paths: &ReportPaths) -> Result<Vec<PathBuf>, PersistenceError> {
    let rendered = render(report)?;
    let mut written = Vec::with_capacity(3);

    file::write_text(&paths.json, &rendered.json)?;
    logf!("saved JSON report: {}", paths.json.display());
    written.push(paths.json.clone());

    file::write_text(&paths.markdown, &rendered.markdown)?;
    logf!("saved Markdown report: {}", paths.markdown.display());
    written.push(paths.markdown.clone());

    if let Some(latest) = &paths.latest {
        file::write_text(latest, &render_latest_snippet(report))?;
        logf!("saved latest snippet: {}", latest.display());
        written.push(latest.clone());
    }
    Ok(written)
}
