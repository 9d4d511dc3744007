//! Navigation Binder
//!
//! Header links. In-page anchors (`#section`) scroll smoothly to their
//! section; other links navigate normally.

use serde::{Deserialize, Serialize};

/// A single navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Section id for in-page anchors, `None` for everything else
    pub fn anchor(&self) -> Option<&str> {
        anchor_target(&self.href)
    }
}

/// `"#news"` -> `Some("news")`; external and empty anchors -> `None`
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Links plus the ids of the sections present on the page
#[derive(Debug, Clone)]
pub struct Navigation {
    links: Vec<NavLink>,
    sections: Vec<String>,
}

impl Navigation {
    pub fn new<I, S>(links: Vec<NavLink>, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            links,
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Section a click on `href` should scroll to.
    ///
    /// `None` means the click is not intercepted (external link) or there is
    /// nothing to scroll to (unknown anchor).
    pub fn resolve(&self, href: &str) -> Option<&str> {
        let id = anchor_target(href)?;
        self.sections
            .iter()
            .find(|section| section.as_str() == id)
            .map(String::as_str)
    }

    /// Anchors that point at no section on the page
    pub fn dangling(&self) -> impl Iterator<Item = &NavLink> {
        self.links
            .iter()
            .filter(|link| link.anchor().is_some() && self.resolve(&link.href).is_none())
    }
}

/// Click binder for the nav list: intercepts `#` links and scrolls the target
/// into view; unknown targets are ignored.
pub const NAV_SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', () => {
    const list = document.querySelector('nav ul');
    if (!list) return;
    list.addEventListener('click', (e) => {
        const link = e.target.closest('a');
        if (!link) return;
        const href = link.getAttribute('href') || '';
        if (!href.startsWith('#')) return;
        e.preventDefault();
        const section = document.getElementById(href.slice(1));
        if (section) {
            section.scrollIntoView({ behavior: 'smooth' });
        }
    });
});
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn navigation() -> Navigation {
        Navigation::new(
            vec![
                NavLink::new("Weather", "#weather"),
                NavLink::new("News", "#news"),
                NavLink::new("Blog", "https://blog.example.com"),
                NavLink::new("Contact", "#contact"),
            ],
            ["home", "weather", "news", "finance"],
        )
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#news"), Some("news"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/about"), None);
        assert_eq!(anchor_target("https://example.com/#news"), None);
    }

    #[test]
    fn test_script_looks_targets_up_by_id() {
        // `#` alone or ids starting with a digit are not valid selectors
        assert!(NAV_SCRIPT.contains("document.getElementById(href.slice(1))"));
        assert!(!NAV_SCRIPT.contains("querySelector(href)"));
    }

    #[test]
    fn test_resolve_known_section() {
        assert_eq!(navigation().resolve("#weather"), Some("weather"));
    }

    #[test]
    fn test_resolve_unknown_or_external() {
        let nav = navigation();
        assert_eq!(nav.resolve("#contact"), None);
        assert_eq!(nav.resolve("https://blog.example.com"), None);
    }

    #[test]
    fn test_dangling_links() {
        let nav = navigation();
        let dangling: Vec<&str> = nav.dangling().map(|l| l.label.as_str()).collect();
        assert_eq!(dangling, vec!["Contact"]);
    }
}
