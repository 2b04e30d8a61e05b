//! Minimal DOM query surface used by the schedule parser.
//!
//! The extractor and parser only need a handful of operations on the markup,
//! so they are written against [`HtmlNode`] instead of a concrete HTML library.
//! [`scraper::ElementRef`] is the production implementation.

use scraper::{ElementRef, Selector};
use tracing::warn;

/// Query operations on one element of a parsed HTML document.
pub trait HtmlNode: Sized + Clone {
    /// All descendants matching `css`, in document order.
    fn select_all(&self, css: &str) -> Vec<Self>;

    /// First descendant matching `css`.
    fn select_first(&self, css: &str) -> Option<Self> {
        self.select_all(css).into_iter().next()
    }

    /// The next sibling that is an element, skipping text and comments.
    fn next_element_sibling(&self) -> Option<Self>;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Concatenated text of this element and all its descendants.
    fn text_content(&self) -> String;
}

impl HtmlNode for ElementRef<'_> {
    fn select_all(&self, css: &str) -> Vec<Self> {
        match Selector::parse(css) {
            Ok(selector) => self.select(&selector).collect(),
            Err(e) => {
                warn!("Ignoring invalid CSS selector {css:?}: {e:?}");
                Vec::new()
            }
        }
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.next_siblings().find_map(ElementRef::wrap)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(String::from)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const FRAGMENT: &str = r#"
        <div id="root">
            <h2 class="day"><span id="a">First</span></h2>
            <!-- comment between siblings -->
            <table class="t"><tr><td class="x">one</td><td class="x">two</td></tr></table>
            <p title="hello">Some <b>bold</b> text</p>
        </div>
    "#;

    #[test]
    fn test_select_all_in_document_order() {
        let html = Html::parse_document(FRAGMENT);
        let root = html.root_element();
        let cells: Vec<String> = root
            .select_all("td.x")
            .iter()
            .map(|cell| cell.text_content())
            .collect();
        assert_eq!(cells, vec!["one", "two"]);
    }

    #[test]
    fn test_next_element_sibling_skips_comments_and_text() {
        let html = Html::parse_document(FRAGMENT);
        let header = html.root_element().select_first("h2.day").unwrap();
        let table = header.next_element_sibling().unwrap();
        assert_eq!(table.value().name(), "table");
    }

    #[test]
    fn test_attribute_and_text_content() {
        let html = Html::parse_document(FRAGMENT);
        let paragraph = html.root_element().select_first("p").unwrap();
        assert_eq!(paragraph.attribute("title").as_deref(), Some("hello"));
        assert_eq!(paragraph.attribute("missing"), None);
        assert_eq!(paragraph.text_content(), "Some bold text");
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let html = Html::parse_document(FRAGMENT);
        assert!(html.root_element().select_all("td[[").is_empty());
        assert!(html.root_element().select_first("td[[").is_none());
    }
}
