use crate::error::{Error, Result};
use crate::types::PostRecord;
use std::path::Path;
use tracing::debug;

/// A source of posts queryable by a text substring
pub trait RecordStore {
    /// Records whose text contains `keyword`, ignoring case.
    /// An empty keyword matches every record.
    fn find_matching(&self, keyword: &str) -> Result<Vec<&PostRecord>>;
}

/// Case-insensitive substring test used by the stores
pub fn text_matches(record: &PostRecord, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    match record.text.as_deref() {
        Some(text) => text.to_lowercase().contains(&keyword.to_lowercase()),
        None => false,
    }
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<PostRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<PostRecord>) -> Self {
        Self { records }
    }

    /// Parse one JSON object per line; blank lines are skipped
    pub fn from_json_lines(contents: &str) -> Result<Self> {
        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line)
                    .map_err(|e| Error::Store(format!("line {}: {}", idx + 1, e)))
            })
            .collect::<Result<Vec<PostRecord>>>()?;
        Ok(Self::new(records))
    }

    /// Parse a single JSON array of records
    pub fn from_json_array(contents: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(contents)?))
    }

    /// Pick the format from the first non-blank character
    pub fn from_json(contents: &str) -> Result<Self> {
        if contents.trim_start().starts_with('[') {
            Self::from_json_array(contents)
        } else {
            Self::from_json_lines(contents)
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn find_matching(&self, keyword: &str) -> Result<Vec<&PostRecord>> {
        let matched: Vec<&PostRecord> = self
            .records
            .iter()
            .filter(|record| text_matches(record, keyword))
            .collect();
        debug!(keyword, matched = matched.len(), total = self.records.len(), "filtered records");
        Ok(matched)
    }
}

/// Read a record file (JSON Lines or a JSON array) into memory
pub async fn load_records(path: &Path) -> Result<MemoryStore> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    MemoryStore::from_json(&contents).map_err(|e| Error::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(text: Option<&str>) -> PostRecord {
        PostRecord {
            text: text.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_matches_ignores_case() {
        assert!(text_matches(&post(Some("Gold in JUDO today")), "judo"));
        assert!(text_matches(&post(Some("judo")), "Judo"));
        assert!(!text_matches(&post(Some("tennis final")), "judo"));
        assert!(!text_matches(&post(None), "judo"));
    }

    #[test]
    fn test_empty_keyword_matches_everything() {
        assert!(text_matches(&post(None), ""));
        let store = MemoryStore::new(vec![post(None), post(Some("x"))]);
        assert_eq!(store.find_matching("").unwrap().len(), 2);
    }

    #[test]
    fn test_from_json_lines_skips_blank_lines() {
        let store = MemoryStore::from_json(
            "{\"text\": \"a\"}\n\n   \n{\"text\": \"b\", \"user\": {\"lang\": \"en\"}}\n",
        )
        .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_from_json_array() {
        let store = MemoryStore::from_json("  [{\"text\": \"a\"}, {}]").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let err = MemoryStore::from_json_lines("{}\nnot json\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
