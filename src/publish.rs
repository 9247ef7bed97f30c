use crate::error::{Error, Result};
use crate::types::AggregationResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Destination for named aggregation results
pub trait ResultSink {
    fn publish(&mut self, name: &str, result: &AggregationResult) -> Result<()>;
}

/// Writes each result as pretty JSON to `<dir>/<name>.json`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the sink, creating the directory if needed
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl ResultSink for DirectorySink {
    fn publish(&mut self, name: &str, result: &AggregationResult) -> Result<()> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(Error::Publish {
                name: name.to_string(),
                reason: "name must be a plain file name".to_string(),
            });
        }

        let mut json = serde_json::to_string_pretty(result)?;
        json.push('\n');
        fs::write(self.path_for(name), json).map_err(|e| Error::Publish {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Keeps results in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    results: BTreeMap<String, AggregationResult>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AggregationResult> {
        self.results.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }
}

impl ResultSink for MemorySink {
    fn publish(&mut self, name: &str, result: &AggregationResult) -> Result<()> {
        self.results.insert(name.to_string(), result.clone());
        Ok(())
    }
}
