//! Parsed-document queries over fetched HTML
//!
//! [`PageDocument`] wraps a parsed `scraper::Html` tree behind
//! optional-returning query functions: a missing title or meta tag is a typed
//! `None`, never a traversal error. The fetcher layers the sentinel values
//! from [`crate::types`] on top of these.
//!
//! `scraper::Html` is not `Send`, so a `PageDocument` must be created and
//! consumed between await points; [`crate::fetcher::Fetcher`] parses the body
//! only after the response has been fully read.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="description"]"#));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static H2: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

#[allow(clippy::expect_used)] // static CSS literals always parse
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// Heading level selectable via [`PageDocument::headings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `<h1>` elements
    H1,
    /// `<h2>` elements
    H2,
}

/// A parsed HTML document exposing the queries the analysis needs
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    /// Parse an HTML string into a queryable document
    ///
    /// Parsing is lenient in the html5ever sense: malformed markup yields a
    /// best-effort tree rather than an error.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Text of the first `<title>` element, if the document has a non-empty one
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// `content` attribute of the first `<meta name="description">` element
    ///
    /// A meta tag without a `content` attribute counts as absent.
    pub fn meta_description(&self) -> Option<String> {
        self.html
            .select(&META_DESCRIPTION)
            .next()
            .and_then(|element| element.value().attr("content"))
            .map(str::to_string)
    }

    /// Text of every heading at the given level, in document order
    pub fn headings(&self, level: HeadingLevel) -> Vec<String> {
        let selector = match level {
            HeadingLevel::H1 => &H1,
            HeadingLevel::H2 => &H2,
        };
        self.html
            .select(selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect()
    }

    /// Count of whitespace-delimited tokens in the document text
    ///
    /// Text nodes are concatenated without separators before splitting, so
    /// adjacent inline elements do not inflate the count.
    pub fn word_count(&self) -> u64 {
        let text: String = self.html.root_element().text().collect();
        text.split_whitespace().count() as u64
    }

    /// Count of anchor (`<a>`) elements anywhere in the document
    pub fn links_count(&self) -> u64 {
        self.html.select(&ANCHOR).count() as u64
    }
}
