//! Thin query layer over a parsed HTML document.
//!
//! Everything returned here is in document order. An empty match set is a
//! valid answer, never an error.

use crate::error::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw HTML. The parser is tolerant, so this never fails.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// All elements carrying `class_name`, in document order
    pub fn select_all(&self, class_name: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = class_selector(class_name)?;
        Ok(self.html.select(&selector).collect())
    }
}

/// Build a `.class` selector, rejecting names that are not a single class token
pub fn class_selector(class_name: &str) -> Result<Selector> {
    let trimmed = class_name.trim().trim_start_matches('.');
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(Error::Selector {
            selector: class_name.to_string(),
            reason: "expected a single class name".to_string(),
        });
    }

    Selector::parse(&format!(".{}", trimmed)).map_err(|e| Error::Selector {
        selector: class_name.to_string(),
        reason: e.to_string(),
    })
}

/// Direct element children of `node` carrying `class_name`
pub fn children_with_class<'a>(node: ElementRef<'a>, class_name: &str) -> Vec<ElementRef<'a>> {
    let class_name = class_name.trim_start_matches('.');
    node.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().classes().any(|c| c == class_name))
        .collect()
}

pub fn attribute<'a>(node: ElementRef<'a>, name: &str) -> Option<&'a str> {
    node.value().attr(name)
}

/// Concatenated text of all descendants, untrimmed
pub fn text(node: ElementRef<'_>) -> String {
    node.text().collect()
}
