//! Keyword-filtered counting of post languages and hashtags.
//!
//! Each run is filter → map → reduce → publish. The two pipeline kinds share
//! every step except key extraction.

use crate::config::{Config, KeywordFilter};
use crate::error::Result;
use crate::publish::ResultSink;
use crate::store::RecordStore;
use crate::types::{AggregationResult, PipelineKind, PostRecord};
use std::collections::BTreeMap;
use tracing::{debug, info};

impl PipelineKind {
    /// Keys a single record contributes, one unit count each
    pub fn extract_keys(&self, record: &PostRecord) -> Vec<String> {
        match self {
            PipelineKind::Langs => record.lang().map(str::to_string).into_iter().collect(),
            PipelineKind::Tags => record.hashtags().map(str::to_lowercase).collect(),
        }
    }
}

/// Map step: `(key, 1)` for every key every record yields
pub fn map_records<'a, I>(kind: PipelineKind, records: I) -> impl Iterator<Item = (String, u64)> + 'a
where
    I: IntoIterator<Item = &'a PostRecord>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .flat_map(move |record| kind.extract_keys(record))
        .map(|key| (key, 1))
}

/// Reduce step: sum values per distinct key
pub fn reduce<I>(pairs: I) -> AggregationResult
where
    I: IntoIterator<Item = (String, u64)>,
{
    pairs
        .into_iter()
        .fold(BTreeMap::new(), |mut counts, (key, n)| {
            *counts.entry(key).or_insert(0) += n;
            counts
        })
        .into()
}

/// Map and reduce a set of already filtered records
pub fn aggregate<'a, I>(kind: PipelineKind, records: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a PostRecord>,
    I::IntoIter: 'a,
{
    reduce(map_records(kind, records))
}

/// Destination name for a result, e.g. `tags.judo` or `langs.all`
pub fn destination_name(kind: PipelineKind, filter: &KeywordFilter) -> String {
    format!("{}.{}", kind, filter.label())
}

/// Filter the store by keyword and count
pub fn run_pipeline<S: RecordStore + ?Sized>(
    store: &S,
    kind: PipelineKind,
    filter: &KeywordFilter,
) -> Result<AggregationResult> {
    let records = store.find_matching(filter.keyword())?;
    Ok(aggregate(kind, records))
}

/// Run every configured keyword and kind in order, publishing each result
/// before starting the next. `on_result` sees each result once published.
/// Returns the destination names in publication order.
pub fn run_all<S, K, F>(store: &S, sink: &mut K, config: &Config, mut on_result: F) -> Result<Vec<String>>
where
    S: RecordStore + ?Sized,
    K: ResultSink + ?Sized,
    F: FnMut(&str, &AggregationResult),
{
    let mut published = Vec::new();

    for filter in &config.keywords {
        debug!(keyword = filter.keyword(), label = filter.label(), "running keyword");
        for &kind in &config.kinds {
            let name = destination_name(kind, filter);
            let result = run_pipeline(store, kind, filter)?;
            sink.publish(&name, &result)?;
            info!(name = %name, keys = result.len(), total = result.total(), "published result");
            on_result(&name, &result);
            published.push(name);
        }
    }

    Ok(published)
}

/// Human-readable rendering, most frequent keys first
pub fn summarize(name: &str, result: &AggregationResult) -> String {
    let mut entries: Vec<(&str, u64)> = result.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = format!("{} ({} keys, {} total)", name, result.len(), result.total());
    for (key, count) in entries {
        out.push_str(&format!("\n  {}: {}", key, count));
    }
    out
}
