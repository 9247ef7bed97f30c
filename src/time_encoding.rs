//! Event time extraction from schedule markup.
//!
//! The schedule generator emits a time range in one of three shapes, and the
//! `data-type` attribute alone tells them apart:
//!
//! | `data-type`        | start time            | end time          |
//! |--------------------|-----------------------|-------------------|
//! | empty or missing   | `class` attribute     | `class` attribute |
//! | ends with `_`      | `.bar-time` child text| `class` attribute |
//! | anything else      | `data-type`           | `data-type`       |
//!
//! Output strings are passed through as found. Formats differ between the
//! shapes and sometimes within one string.

use crate::document;
use scraper::ElementRef;

/// One scraped node describing an event's time span
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeElement {
    /// Raw `class` attribute, unmodified
    pub class_attribute: String,
    /// `data-type` attribute; `None` when the attribute is missing
    pub data_type: Option<String>,
    /// Text of the `.bar-time` child, when there is one
    pub bar_time_text: Option<String>,
}

/// How a [`TimeElement`] encodes its time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEncoding {
    /// Start and end both live in the class attribute
    Joint,
    /// Start lives in the bar-time text, end in the class attribute
    SplitBar,
    /// `data-type` holds the complete range
    Explicit,
}

impl TimeElement {
    /// Read a time element from a document node. `bar_class` names the child
    /// holding the start time in the split encoding.
    pub fn from_node(node: ElementRef<'_>, bar_class: &str) -> Self {
        let bars = document::children_with_class(node, bar_class);
        let bar_time_text = if bars.is_empty() {
            None
        } else {
            Some(bars.into_iter().map(document::text).collect())
        };

        Self {
            class_attribute: document::attribute(node, "class")
                .unwrap_or_default()
                .to_string(),
            data_type: document::attribute(node, "data-type").map(str::to_string),
            bar_time_text,
        }
    }

    pub fn encoding(&self) -> TimeEncoding {
        classify(self.data_type.as_deref())
    }

    /// The raw time range string for this element
    pub fn resolve(&self) -> String {
        match self.encoding() {
            TimeEncoding::Joint => self.class_attribute.clone(),
            TimeEncoding::SplitBar => format!(
                "{} {}",
                self.class_attribute,
                self.bar_time_text.as_deref().unwrap_or_default()
            ),
            TimeEncoding::Explicit => self.data_type.clone().unwrap_or_default(),
        }
    }
}

/// Decide the encoding from the `data-type` attribute. A missing attribute
/// counts as empty.
pub fn classify(data_type: Option<&str>) -> TimeEncoding {
    match data_type.unwrap_or_default() {
        "" => TimeEncoding::Joint,
        dt if dt.ends_with('_') => TimeEncoding::SplitBar,
        _ => TimeEncoding::Explicit,
    }
}
