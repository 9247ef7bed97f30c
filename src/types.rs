use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single social-media post as read from the record store.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
}

/// Author information attached to a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Entities extracted from the post body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<Hashtag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hashtag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PostRecord {
    /// Language code of the author, if both `user` and `user.lang` are present
    pub fn lang(&self) -> Option<&str> {
        self.user.as_ref()?.lang.as_deref()
    }

    /// Hashtag texts in post order; entries without text are skipped
    pub fn hashtags(&self) -> impl Iterator<Item = &str> {
        self.entities
            .as_ref()
            .and_then(|e| e.hashtags.as_deref())
            .unwrap_or_default()
            .iter()
            .filter_map(|tag| tag.text.as_deref())
    }
}

/// Which attribute an aggregation pipeline counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    /// Author language codes, verbatim
    Langs,
    /// Hashtags, lower-cased
    Tags,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 2] = [PipelineKind::Langs, PipelineKind::Tags];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Langs => "langs",
            PipelineKind::Tags => "tags",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "langs" => Ok(PipelineKind::Langs),
            "tags" => Ok(PipelineKind::Tags),
            other => Err(Error::Config(format!(
                "Invalid pipeline kind '{}'. Allowed values are: langs, tags",
                other
            ))),
        }
    }
}

/// Per-key counts produced by one pipeline run for one keyword.
///
/// Keys are kept sorted so serialized output is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationResult(BTreeMap<String, u64>);

impl AggregationResult {
    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<BTreeMap<String, u64>> for AggregationResult {
    fn from(counts: BTreeMap<String, u64>) -> Self {
        Self(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize() {
        let record: PostRecord = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(record.lang(), None);
        assert_eq!(record.hashtags().count(), 0);

        let record: PostRecord = serde_json::from_str(r#"{"user": {}}"#).unwrap();
        assert_eq!(record.lang(), None);

        let record: PostRecord =
            serde_json::from_str(r#"{"entities": {"hashtags": [{"text": "Judo"}, {}]}}"#).unwrap();
        assert_eq!(record.hashtags().collect::<Vec<_>>(), vec!["Judo"]);
    }

    #[test]
    fn test_pipeline_kind_parse() {
        assert_eq!("langs".parse::<PipelineKind>().unwrap(), PipelineKind::Langs);
        assert_eq!(" TAGS ".parse::<PipelineKind>().unwrap(), PipelineKind::Tags);
        assert!("users".parse::<PipelineKind>().is_err());
    }
}
