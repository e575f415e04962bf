// src/engine/tree.rs
//! Selector trees.
//!
//! A [`SelectorNode`] is either a leaf holding one selector (empty means
//! "not configured") or a branch of named children in declaration order.
//! Shapes differ between target types; nothing here knows any of them.

use serde_yaml::Value;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorNode {
    Leaf(String),
    Branch(Vec<(String, SelectorNode)>),
}

impl SelectorNode {
    pub fn leaf(selector: impl Into<String>) -> Self {
        SelectorNode::Leaf(selector.into())
    }

    /// Unconfigured leaf; skipped during verification.
    pub fn empty() -> Self {
        SelectorNode::Leaf(s!())
    }

    pub fn branch<N, I>(children: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, SelectorNode)>,
    {
        SelectorNode::Branch(children.into_iter().map(|(n, c)| (n.into(), c)).collect())
    }

    /// Depth-first walk over non-empty leaves, in declaration order.
    /// `f` receives the dotted label and the selector.
    ///
    /// Child names must be non-empty and dot-free, otherwise labels become
    /// ambiguous. Checked in debug builds.
    pub fn for_each_leaf<F>(&self, f: &mut F)
    where
        F: FnMut(&str, &str),
    {
        self.walk("", f);
    }

    fn walk<F>(&self, prefix: &str, f: &mut F)
    where
        F: FnMut(&str, &str),
    {
        match self {
            SelectorNode::Leaf(sel) => {
                if !sel.trim().is_empty() {
                    f(prefix, sel.trim());
                }
            }
            SelectorNode::Branch(children) => {
                for (name, child) in children {
                    debug_assert!(
                        is_valid_name(name),
                        "selector node name {name:?} under {prefix:?} must be non-empty and contain no '.'"
                    );
                    let path = label!(prefix, name);
                    child.walk(&path, f);
                }
            }
        }
    }

    /// Number of leaves that will produce a result.
    pub fn configured_leaves(&self) -> usize {
        let mut n = 0;
        self.for_each_leaf(&mut |_, _| n += 1);
        n
    }

    /// Release-build counterpart of the walk's debug assertion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_at("")
    }

    fn validate_at(&self, prefix: &str) -> Result<(), ConfigError> {
        if let SelectorNode::Branch(children) = self {
            for (name, child) in children {
                if !is_valid_name(name) {
                    return Err(ConfigError::Shape { label: label!(prefix, name), found: "bad name" });
                }
                child.validate_at(&label!(prefix, name))?;
            }
        }
        Ok(())
    }

    /// Build a tree from YAML. Strings are leaves, null is an empty leaf,
    /// mappings are branches (order kept, keys turned into `PascalCase`
    /// label segments). Anything else is a shape error.
    pub fn from_yaml(value: &Value) -> Result<Self, ConfigError> {
        Self::from_yaml_at(value, "")
    }

    fn from_yaml_at(value: &Value, prefix: &str) -> Result<Self, ConfigError> {
        match value {
            Value::String(s) => Ok(SelectorNode::leaf(s.as_str())),
            Value::Null => Ok(SelectorNode::empty()),
            Value::Mapping(map) => {
                let mut children = Vec::with_capacity(map.len());
                for (k, v) in map {
                    let Some(key) = k.as_str() else {
                        return Err(ConfigError::Shape { label: label!(prefix, "?"), found: "non-string key" });
                    };
                    let name = pascal_case(key);
                    let child = Self::from_yaml_at(v, &label!(prefix, &name))?;
                    children.push((name, child));
                }
                Ok(SelectorNode::Branch(children))
            }
            Value::Tagged(t) => Self::from_yaml_at(&t.value, prefix),
            other => Err(ConfigError::Shape { label: s!(prefix), found: yaml_kind(other) }),
        }
    }
}

/// A target type's full selector set: the nested tree plus a few
/// top-level selectors checked after it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorTree {
    pub selectors: SelectorNode,
    pub top_level: Vec<(String, String)>,
}

impl Default for SelectorNode {
    fn default() -> Self {
        SelectorNode::Branch(Vec::new())
    }
}

impl SelectorTree {
    pub fn new(selectors: SelectorNode) -> Self {
        Self { selectors, top_level: Vec::new() }
    }

    /// Add a top-level selector, or replace the one already under `label`.
    pub fn with_top_level(mut self, label: impl Into<String>, selector: impl Into<String>) -> Self {
        let (label, selector) = (label.into(), selector.into());
        match self.top_level.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = selector,
            None => self.top_level.push((label, selector)),
        }
        self
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('.')
}

/// `username_input` -> `UsernameInput`; already-cased names pass through.
pub fn pascal_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for part in key.split(['_', '-']).filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn yaml_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(node: &SelectorNode) -> Vec<(String, String)> {
        let mut out = Vec::new();
        node.for_each_leaf(&mut |l, s| out.push((s!(l), s!(s))));
        out
    }

    #[test]
    fn walk_keeps_declaration_order_and_dotted_labels() {
        let tree = SelectorNode::branch([
            ("Login", SelectorNode::branch([
                ("UsernameInput", SelectorNode::leaf("input#u")),
                ("PasswordInput", SelectorNode::empty()),
                ("LoginButton", SelectorNode::leaf("button#login")),
            ])),
            ("Odds", SelectorNode::branch([
                ("Live", SelectorNode::branch([("Score", SelectorNode::leaf(".score"))])),
            ])),
        ]);
        assert_eq!(
            labels(&tree),
            vec![
                (s!("Login.UsernameInput"), s!("input#u")),
                (s!("Login.LoginButton"), s!("button#login")),
                (s!("Odds.Live.Score"), s!(".score")),
            ]
        );
        assert_eq!(tree.configured_leaves(), 3);
    }

    #[test]
    fn whitespace_only_leaf_is_skipped() {
        let tree = SelectorNode::branch([("A", SelectorNode::leaf("   "))]);
        assert!(labels(&tree).is_empty());
    }

    #[test]
    fn yaml_mapping_becomes_branch() {
        let yaml: Value = serde_yaml::from_str(
            "login:\n  username_input: input#u\n  password_input: ''\nbet_slip:\n  stake_input: ~\n",
        )
        .unwrap();
        let tree = SelectorNode::from_yaml(&yaml).unwrap();
        assert_eq!(labels(&tree), vec![(s!("Login.UsernameInput"), s!("input#u"))]);
        match &tree {
            SelectorNode::Branch(children) => {
                let names: Vec<&str> = children.iter().map(|(n, _)| n.as_str()).collect();
                assert_eq!(names, ["Login", "BetSlip"]);
            }
            SelectorNode::Leaf(_) => panic!("expected branch"),
        }
    }

    #[test]
    fn yaml_wrong_shape_names_the_path() {
        let yaml: Value = serde_yaml::from_str("login:\n  retries: 3\n").unwrap();
        match SelectorNode::from_yaml(&yaml) {
            Err(ConfigError::Shape { label, found }) => {
                assert_eq!(label, "Login.Retries");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_dotted_names() {
        let tree = SelectorNode::branch([("a.b", SelectorNode::leaf("x"))]);
        assert!(tree.validate().is_err());
        assert!(SelectorNode::branch([("ab", SelectorNode::leaf("x"))]).validate().is_ok());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "must be non-empty and contain no '.'")]
    fn walking_a_dotted_child_name_panics_in_debug() {
        let tree = SelectorNode::branch([("a.b", SelectorNode::leaf("x"))]);
        tree.for_each_leaf(&mut |_, _| {});
    }

    #[test]
    fn top_level_label_is_replaced_not_duplicated() {
        let tree = SelectorTree::default()
            .with_top_level("BetButton", "button#old")
            .with_top_level("BetButton", "button#new");
        assert_eq!(tree.top_level, vec![(s!("BetButton"), s!("button#new"))]);
    }

    #[test]
    fn pascal_case_keys() {
        assert_eq!(pascal_case("username_input"), "UsernameInput");
        assert_eq!(pascal_case("in-play_bet"), "InPlayBet");
        assert_eq!(pascal_case("Login"), "Login");
    }
}
