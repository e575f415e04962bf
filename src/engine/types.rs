// src/engine/types.rs
use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::consts::{FAIL_MARK, PASS_MARK};

/// Outcome of one check.
///
/// Encoded as a bare string: the pass/fail marks, or the diagnostic text
/// for a check that could not run (fetch failure and the like). Diagnostic
/// text that collides with a mark is written with a leading backslash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    Error(String),
}

impl Status {
    pub fn from_passed(passed: bool) -> Self {
        if passed { Status::Pass } else { Status::Fail }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Status::Pass)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Pass => PASS_MARK,
            Status::Fail => FAIL_MARK,
            Status::Error(msg) => msg,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leads an encoded diagnostic that would otherwise read as a mark
/// (or as another escaped diagnostic).
const ESCAPE: char = '\\';

impl Status {
    fn encode(&self) -> Cow<'_, str> {
        match self {
            Status::Error(msg) if msg == PASS_MARK || msg == FAIL_MARK || msg.starts_with(ESCAPE) => {
                Cow::Owned(format!("{ESCAPE}{msg}"))
            }
            other => Cow::Borrowed(other.as_str()),
        }
    }

    fn decode(raw: String) -> Self {
        if let Some(msg) = raw.strip_prefix(ESCAPE) {
            return Status::Error(s!(msg));
        }
        match raw.as_str() {
            PASS_MARK => Status::Pass,
            FAIL_MARK => Status::Fail,
            _ => Status::Error(raw),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        String::deserialize(de).map(Status::decode)
    }
}

/// One labelled check, e.g. `Login.UsernameInput: ✅`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub label: String,
    pub status: Status,
}

impl VerificationResult {
    pub fn new(label: impl Into<String>, passed: bool) -> Self {
        Self { label: label.into(), status: Status::from_passed(passed) }
    }

    /// A check that never ran; always counts as failed.
    pub fn diagnostic(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self { label: label.into(), status: Status::Error(message.into()) }
    }

    pub fn passed(&self) -> bool {
        self.status.passed()
    }
}

/// Ordered results for one document plus their conjunction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verification {
    pub results: Vec<VerificationResult>,
    pub all_pass: bool,
}

impl Default for Verification {
    fn default() -> Self {
        Self { results: Vec::new(), all_pass: true }
    }
}

impl Verification {
    pub fn push(&mut self, result: VerificationResult) {
        self.all_pass &= result.passed();
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = VerificationResult>) {
        for r in results {
            self.push(r);
        }
    }
}
