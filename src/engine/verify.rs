// src/engine/verify.rs
use crate::core::html::Document;
use crate::engine::tree::{SelectorNode, SelectorTree};
use crate::engine::types::{Verification, VerificationResult};

/// Check every configured leaf of `tree` against `doc`.
///
/// One result per non-empty leaf, depth-first in declaration order,
/// labelled with its dotted path. Empty leaves are skipped and do not
/// affect `all_pass`.
pub fn verify(tree: &SelectorNode, doc: &Document) -> Verification {
    let mut out = Verification::default();
    tree.for_each_leaf(&mut |label, selector| {
        out.push(check(doc, label, selector));
    });
    out
}

/// [`verify`] over the nested selectors, then the top-level ones,
/// folded into the same result list.
pub fn verify_tree(tree: &SelectorTree, doc: &Document) -> Verification {
    let mut out = verify(&tree.selectors, doc);
    for (label, selector) in &tree.top_level {
        let selector = selector.trim();
        if selector.is_empty() {
            continue;
        }
        out.push(check(doc, label, selector));
    }
    out
}

fn check(doc: &Document, label: &str, selector: &str) -> VerificationResult {
    let passed = match doc.exists(selector) {
        Ok(found) => found,
        Err(e) => {
            logw!("{label}: {e}");
            false
        }
    };
    logd!("{label} [{selector}] -> {}", if passed { "found" } else { "missing" });
    VerificationResult::new(label, passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Status;

    const PAGE: &str = r#"
        <html><body>
          <input id="u"><input id="p">
          <div class="moneyline"></div>
          <button id="placeBet">Bet</button>
        </body></html>
    "#;

    fn login_tree() -> SelectorNode {
        SelectorNode::branch([
            ("Login", SelectorNode::branch([
                ("UsernameInput", SelectorNode::leaf("input#u")),
                ("PasswordInput", SelectorNode::leaf("input#p")),
                ("LoginButton", SelectorNode::leaf("button#login")),
            ])),
            ("OddsSelector", SelectorNode::branch([
                ("Moneyline", SelectorNode::leaf("div.moneyline")),
                ("Spread", SelectorNode::empty()),
            ])),
        ])
    }

    #[test]
    fn one_result_per_configured_leaf() {
        let doc = Document::parse(PAGE);
        let v = verify(&login_tree(), &doc);
        let got: Vec<(&str, bool)> = v.results.iter().map(|r| (r.label.as_str(), r.passed())).collect();
        assert_eq!(
            got,
            vec![
                ("Login.UsernameInput", true),
                ("Login.PasswordInput", true),
                ("Login.LoginButton", false),
                ("OddsSelector.Moneyline", true),
            ]
        );
        assert!(!v.all_pass);
    }

    #[test]
    fn only_empty_leaves_trivially_pass() {
        let doc = Document::parse(PAGE);
        let tree = SelectorNode::branch([
            ("Login", SelectorNode::branch([("UsernameInput", SelectorNode::empty())])),
        ]);
        let v = verify(&tree, &doc);
        assert!(v.results.is_empty());
        assert!(v.all_pass);
    }

    #[test]
    fn top_level_selectors_come_after_the_tree() {
        let doc = Document::parse(PAGE);
        let tree = SelectorTree::new(login_tree())
            .with_top_level("BetButton", "button#placeBet")
            .with_top_level("BetHistory", "div#betHistory")
            .with_top_level("Unused", "");
        let v = verify_tree(&tree, &doc);
        let tail: Vec<(&str, &Status)> =
            v.results.iter().skip(4).map(|r| (r.label.as_str(), &r.status)).collect();
        assert_eq!(tail, vec![("BetButton", &Status::Pass), ("BetHistory", &Status::Fail)]);
        assert_eq!(v.results.len(), 6);
    }

    #[test]
    fn invalid_selector_fails_the_leaf_only() {
        let doc = Document::parse(PAGE);
        let tree = SelectorNode::branch([
            ("Broken", SelectorNode::leaf("div[[")),
            ("Fine", SelectorNode::leaf("input#u")),
        ]);
        let v = verify(&tree, &doc);
        assert_eq!(v.results.len(), 2);
        assert!(!v.results[0].passed());
        assert!(v.results[1].passed());
        assert!(!v.all_pass);
    }
}
