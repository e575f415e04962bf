// src/core/html.rs
// Queryable document built on `scraper`. The engine only ever asks
// "does anything match this selector?", selector text stays opaque here.

use scraper::{Html, Selector};

/// A parsed page.
///
/// Not `Send`: documents are built and consumed inside a single worker.
pub struct Document {
    html: Html,
}

/// The selector text was not valid CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadSelector {
    pub selector: String,
    pub reason: String,
}

impl std::fmt::Display for BadSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid selector {:?}: {}", self.selector, self.reason)
    }
}

impl std::error::Error for BadSelector {}

impl Document {
    /// Parse a full HTML document. html5ever recovers from any markup,
    /// so this never fails.
    pub fn parse(body: &str) -> Self {
        Self { html: Html::parse_document(body) }
    }

    /// True iff at least one node matches `selector`.
    pub fn exists(&self, selector: &str) -> Result<bool, BadSelector> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().is_some())
    }

    /// Text of the first `<title>`, whitespace-collapsed. Empty when missing.
    pub fn title(&self) -> String {
        let Ok(sel) = compile("title") else { return s!() };
        self.html
            .select(&sel)
            .next()
            .map(|t| normalize_ws(&t.text().collect::<String>()))
            .unwrap_or_default()
    }

    /// True iff the first element matching `tag` carries `class`.
    pub fn first_has_class(&self, tag: &str, class: &str) -> bool {
        let Ok(sel) = compile(tag) else { return false };
        self.html
            .select(&sel)
            .next()
            .map(|el| el.value().classes().any(|c| c == class))
            .unwrap_or(false)
    }
}

fn compile(selector: &str) -> Result<Selector, BadSelector> {
    Selector::parse(selector).map_err(|e| BadSelector {
        selector: s!(selector),
        reason: e.to_string(),
    })
}

/// Collapse runs of whitespace into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><title>  Betika |
            Sports </title></head>
        <body class="main-page dark">
          <form><input id="u" name="user"><input id="p" type="password"></form>
          <div class="odds"><span>1.5</span><span>2.1</span></div>
        </body></html>
    "#;

    #[test]
    fn exists_matches_and_misses() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.exists("input#u"), Ok(true));
        assert_eq!(doc.exists("div.odds span"), Ok(true));
        assert_eq!(doc.exists("button#login"), Ok(false));
    }

    #[test]
    fn invalid_selector_is_reported() {
        let doc = Document::parse(PAGE);
        let err = doc.exists("div[[").unwrap_err();
        assert_eq!(err.selector, "div[[");
    }

    #[test]
    fn title_is_whitespace_collapsed() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.title(), "Betika | Sports");
        assert_eq!(Document::parse("<p>x</p>").title(), "");
    }

    #[test]
    fn first_has_class_checks_first_match_only() {
        let doc = Document::parse(PAGE);
        assert!(doc.first_has_class("body", "main-page"));
        assert!(!doc.first_has_class("body", "header"));
        assert!(!doc.first_has_class("div[[", "odds"));
    }
}
