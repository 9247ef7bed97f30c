use crate::document::Document;
use crate::error::Result;
use crate::time_encoding::TimeElement;
use std::io::Write;
use tracing::debug;

/// Collect every time element in the document, in document order
pub fn extract_time_elements(
    doc: &Document,
    time_class: &str,
    bar_class: &str,
) -> Result<Vec<TimeElement>> {
    let nodes = doc.select_all(time_class)?;
    debug!(count = nodes.len(), selector = time_class, "matched time elements");
    Ok(nodes
        .into_iter()
        .map(|node| TimeElement::from_node(node, bar_class))
        .collect())
}

/// One resolved time range per matched element
pub fn time_report(source: &str, time_class: &str, bar_class: &str) -> Result<Vec<String>> {
    let doc = Document::parse(source);
    let lines = extract_time_elements(&doc, time_class, bar_class)?
        .iter()
        .map(|el| {
            let line = el.resolve();
            debug!(encoding = ?el.encoding(), line = %line, "resolved time element");
            line
        })
        .collect();
    Ok(lines)
}

/// Write report lines, newline-terminated, nothing else
pub fn write_report<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
