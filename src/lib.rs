//! Event time extraction from schedule markup, and keyword-filtered counting
//! of post languages and hashtags.
//!
//! The time report resolves each marked-up time element to the raw range
//! string its encoding carries. The aggregation pipelines filter posts by
//! keyword, count a derived key per post, and publish one named result per
//! keyword and kind.

pub mod aggregate;
pub mod config;
pub mod document;
pub mod error;
pub mod publish;
pub mod report;
pub mod store;
pub mod time_encoding;
pub mod types;

pub use aggregate::{destination_name, run_all, run_pipeline, summarize};
pub use config::{Config, ConfigBuilder, ConfigFile, KeywordFilter};
pub use error::{Error, Result};
pub use publish::{DirectorySink, MemorySink, ResultSink};
pub use store::{load_records, MemoryStore, RecordStore};
pub use time_encoding::{classify, TimeElement, TimeEncoding};
pub use types::{AggregationResult, PipelineKind, PostRecord};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::aggregate::{run_all, summarize};
    pub use crate::config::{Config, ConfigBuilder, ConfigFile, KeywordFilter};
    pub use crate::error::{Error, Result};
    pub use crate::publish::{DirectorySink, MemorySink, ResultSink};
    pub use crate::report::{time_report, write_report};
    pub use crate::store::{load_records, MemoryStore, RecordStore};
    pub use crate::types::{AggregationResult, PipelineKind, PostRecord};
}
