use crate::error::{Error, Result};
use crate::types::PipelineKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Sports tracked when no keywords are configured
pub const DEFAULT_KEYWORDS: [&str; 5] = ["gymnastics", "tennis", "archery", "judo", "fencing"];

/// Label used for the empty keyword
pub const ALL_LABEL: &str = "all";

pub const DEFAULT_TIME_CLASS: &str = "bar";
pub const DEFAULT_BAR_CLASS: &str = "bar-time";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// A case-insensitive substring filter over post text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    keyword: String,
}

impl KeywordFilter {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }

    /// The filter that matches every record
    pub fn all() -> Self {
        Self::new("")
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_all(&self) -> bool {
        self.keyword.is_empty()
    }

    /// Name used in result destinations
    pub fn label(&self) -> &str {
        if self.is_all() {
            ALL_LABEL
        } else {
            &self.keyword
        }
    }
}

/// Configuration for the report and aggregation runs
#[derive(Debug, Clone)]
pub struct Config {
    /// Keyword filters, `all` first
    pub keywords: Vec<KeywordFilter>,
    pub kinds: Vec<PipelineKind>,
    pub output_dir: PathBuf,
    /// Class marking a time element
    pub time_class: String,
    /// Class marking the start-time child in the split encoding
    pub bar_class: String,
}

impl Config {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            keywords: normalize_keywords(DEFAULT_KEYWORDS.iter().map(|k| k.to_string())),
            kinds: PipelineKind::ALL.to_vec(),
            output_dir: output_dir.into(),
            time_class: DEFAULT_TIME_CLASS.to_string(),
            bar_class: DEFAULT_BAR_CLASS.to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(Error::Config("At least one pipeline kind is required".to_string()));
        }

        if self.keywords.first().map(KeywordFilter::is_all) != Some(true) {
            return Err(Error::Config("The 'all' filter must come first".to_string()));
        }

        if let Some(clash) = self.keywords.iter().skip(1).find(|k| k.label() == ALL_LABEL) {
            return Err(Error::Config(format!(
                "Keyword '{}' collides with the '{}' result name",
                clash.keyword(),
                ALL_LABEL
            )));
        }

        for (what, class) in [("time class", &self.time_class), ("bar class", &self.bar_class)] {
            if class.trim().is_empty() || class.trim().chars().any(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "Invalid {} '{}': expected a single class name",
                    what, class
                )));
            }
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("Output directory must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

/// Put the `all` filter first and drop repeated keywords
fn normalize_keywords(keywords: impl IntoIterator<Item = String>) -> Vec<KeywordFilter> {
    let mut filters = vec![KeywordFilter::all()];
    for keyword in keywords {
        if !filters.iter().any(|f| f.keyword() == keyword) {
            filters.push(KeywordFilter::new(keyword));
        }
    }
    filters
}

/// On-disk configuration (YAML). Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub keywords: Option<Vec<String>>,
    pub kinds: Option<Vec<PipelineKind>>,
    pub output_dir: Option<PathBuf>,
    pub time_class: Option<String>,
    pub bar_class: Option<String>,
}

impl ConfigFile {
    /// Load and parse a YAML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Apply every value present in a configuration file
    pub fn file(mut self, file: ConfigFile) -> Self {
        if let Some(keywords) = file.keywords {
            self = self.keywords(keywords);
        }
        if let Some(kinds) = file.kinds {
            self = self.kinds(kinds);
        }
        if let Some(dir) = file.output_dir {
            self = self.output_dir(dir);
        }
        if let Some(class) = file.time_class {
            self = self.time_class(class);
        }
        if let Some(class) = file.bar_class {
            self = self.bar_class(class);
        }
        self
    }

    /// Replace the keyword list. The `all` filter is always kept.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.keywords = normalize_keywords(keywords.into_iter().map(Into::into));
        self
    }

    pub fn kinds(mut self, kinds: Vec<PipelineKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        self.config.kinds = unique;
        self
    }

    /// Set kinds from strings such as `langs` or `tags`
    pub fn kinds_str<S: AsRef<str>>(self, kinds: &[S]) -> Result<Self> {
        let parsed: Result<Vec<PipelineKind>> = kinds.iter().map(|k| k.as_ref().parse()).collect();
        Ok(self.kinds(parsed?))
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn time_class(mut self, class: impl Into<String>) -> Self {
        self.config.time_class = class.into().trim_start_matches('.').to_string();
        self
    }

    pub fn bar_class(mut self, class: impl Into<String>) -> Self {
        self.config.bar_class = class.into().trim_start_matches('.').to_string();
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
