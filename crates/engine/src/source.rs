use crate::error::{EngineError, Result};
use crate::overview::densify_overview;
use crate::range::RangeDecoder;
use async_trait::async_trait;
use noctrace_model::{Meta, NodeRecord, RangeResponse, SnapshotSummaryRecord};
use noctrace_store::TraceCatalog;
use std::path::Path;

/// Legacy scaling applied to per-edge history counts; the downstream chart
/// contract expects counts recorded at 20x.
pub const HISTORY_COUNT_DIVISOR: f64 = 20.0;

/// Capability set a trace data source offers its collaborators. One concrete
/// implementation exists ([`LocalTraceSource`]); remote or archival sources
/// would satisfy the same set.
#[async_trait]
pub trait TraceSource {
    /// Index the trace, load metadata and the overview. Must complete before
    /// any other call.
    async fn initialize(&mut self) -> Result<Meta>;

    /// The dense overview grid: one record per (slice, message type) pair
    /// for every slice in `[0, elapse)`.
    async fn flat_overview(&self) -> Result<Vec<SnapshotSummaryRecord>>;

    /// Windowed per-edge traffic for `[start, end)`, or the all-zero
    /// topology for the `(0, 0)` sentinel.
    ///
    /// Concurrent calls run to completion independently and complete in
    /// unspecified order; nothing here cancels or supersedes an in-flight
    /// request. Callers driving shared display state should tag overlapping
    /// requests with sequence numbers and drop superseded responses.
    async fn windowed_traffic(&self, start: i64, end: i64) -> Result<RangeResponse>;

    /// Per-edge history from `edgehis/{name}.json`, counts scaled down by
    /// [`HISTORY_COUNT_DIVISOR`]. `None` when the trace has no history for
    /// that edge.
    async fn snapshot_history(&self, edge_name: &str)
        -> Result<Option<Vec<SnapshotSummaryRecord>>>;
}

/// [`TraceSource`] backed by a local trace directory.
pub struct LocalTraceSource {
    catalog: TraceCatalog,
    meta: Option<Meta>,
    nodes: Vec<NodeRecord>,
    overview: Vec<SnapshotSummaryRecord>,
}

impl LocalTraceSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            catalog: TraceCatalog::new(root),
            meta: None,
            nodes: Vec::new(),
            overview: Vec::new(),
        }
    }

    fn meta(&self) -> Result<&Meta> {
        self.meta.as_ref().ok_or(EngineError::NotInitialized)
    }
}

#[async_trait]
impl TraceSource for LocalTraceSource {
    async fn initialize(&mut self) -> Result<Meta> {
        self.catalog.scan();

        let meta_text = self
            .catalog
            .named_content("meta")
            .await
            .ok_or_else(|| EngineError::MissingFile("meta.json".into()))?;
        let meta: Meta = serde_json::from_str(&meta_text).map_err(|source| EngineError::Format {
            file: "meta.json".into(),
            source,
        })?;

        let mut overview: Vec<SnapshotSummaryRecord> =
            match self.catalog.named_content("flat").await {
                Some(text) => serde_json::from_str(&text).map_err(|source| EngineError::Format {
                    file: "flat.json".into(),
                    source,
                })?,
                None => {
                    log::warn!("flat.json missing; overview starts empty");
                    Vec::new()
                }
            };
        overview.sort_by_key(|r| r.slice);
        let overview = densify_overview(overview, meta.elapse);

        let nodes: Vec<NodeRecord> = match self.catalog.named_content("nodes").await {
            Some(text) => serde_json::from_str(&text).map_err(|source| EngineError::Format {
                file: "nodes.json".into(),
                source,
            })?,
            None => {
                log::warn!("nodes.json missing; topology nodes start empty");
                Vec::new()
            }
        };

        self.meta = Some(meta.clone());
        self.overview = overview;
        self.nodes = nodes;
        log::info!(
            "initialized trace: {}x{} mesh, elapse {}, {} slices on disk",
            meta.width,
            meta.height,
            meta.elapse,
            self.catalog.slices().len()
        );
        Ok(meta)
    }

    async fn flat_overview(&self) -> Result<Vec<SnapshotSummaryRecord>> {
        self.meta()?;
        Ok(self.overview.clone())
    }

    async fn windowed_traffic(&self, start: i64, end: i64) -> Result<RangeResponse> {
        let meta = self.meta()?;
        let decoder = RangeDecoder::new(meta, self.catalog.slices());
        let edges = decoder.windowed_edges(start, end).await?;
        Ok(RangeResponse {
            meta: meta.clone(),
            nodes: self.nodes.clone(),
            edges,
        })
    }

    async fn snapshot_history(
        &self,
        edge_name: &str,
    ) -> Result<Option<Vec<SnapshotSummaryRecord>>> {
        self.meta()?;
        let Some(text) = self.catalog.history_content(edge_name).await else {
            return Ok(None);
        };
        let mut records: Vec<SnapshotSummaryRecord> =
            serde_json::from_str(&text).map_err(|source| EngineError::Format {
                file: format!("edgehis/{edge_name}.json"),
                source,
            })?;
        for record in &mut records {
            record.count /= HISTORY_COUNT_DIVISOR;
        }
        Ok(Some(records))
    }
}
