//! In-page navigation for fragment links.
//!
//! Every link whose `href` starts with `#` scrolls smoothly to its target
//! instead of jumping. A link whose target does not exist does nothing at all.

use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

static ELEMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)id\s*=\s*"([^"]*)""#).unwrap());

static FRAGMENT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\b([^>]*?)\bhref\s*=\s*"(#[^"]*)"([^>]*)>"#).unwrap()
});

/// The parts of a page anchor handling needs.
pub trait Document {
    fn has_element(&self, id: &str) -> bool;
    fn smooth_scroll_to(&mut self, id: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorClick {
    /// Not a fragment link; default navigation applies.
    Ignored,
    /// Default jump suppressed, no target to scroll to.
    Prevented,
    /// Default jump suppressed and the page scrolled to the target id.
    Scrolled(String),
}

fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

pub fn on_anchor_click<D: Document>(href: &str, doc: &mut D) -> AnchorClick {
    let Some(target) = fragment_target(href) else {
        return AnchorClick::Ignored;
    };
    if target.is_empty() || !doc.has_element(target) {
        return AnchorClick::Prevented;
    }
    doc.smooth_scroll_to(target);
    AnchorClick::Scrolled(target.to_string())
}

/// A rendered HTML page viewed as a [`Document`].
#[derive(Clone, Debug, Default)]
pub struct HtmlDocument {
    ids: HashSet<String>,
    scrolled_to: Option<String>,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        let ids = ELEMENT_ID
            .captures_iter(html)
            .map(|cap| cap[1].to_string())
            .collect();
        Self {
            ids,
            scrolled_to: None,
        }
    }

    pub fn scrolled_to(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }
}

impl Document for HtmlDocument {
    fn has_element(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn smooth_scroll_to(&mut self, id: &str) {
        self.scrolled_to = Some(id.to_string());
    }
}

/// Returns every fragment `href` in the page, in document order.
#[cfg(test)]
pub(crate) fn fragment_links(html: &str) -> Vec<String> {
    FRAGMENT_LINK
        .captures_iter(html)
        .map(|cap| cap[2].to_string())
        .collect()
}

/// Marks fragment links in `html` for smooth scrolling.
///
/// Links with an existing target get `data-scroll="smooth"`. Links without one
/// get `data-scroll="none"` and a handler that cancels the jump.
pub fn bind_anchor_links(html: &str) -> String {
    let doc = HtmlDocument::parse(html);
    FRAGMENT_LINK
        .replace_all(html, |cap: &Captures| {
            let href = &cap[2];
            let mut scratch = doc.clone();
            let binding = match on_anchor_click(href, &mut scratch) {
                AnchorClick::Scrolled(_) => r#" data-scroll="smooth""#,
                _ => r#" data-scroll="none" onclick="return false;""#,
            };
            format!(r#"<a{}href="{}"{}{}>"#, &cap[1], href, &cap[3], binding)
        })
        .into_owned()
}
