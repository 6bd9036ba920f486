//! # NoC Trace Engine
//!
//! Traffic aggregation over a recorded network-on-chip trace.
//!
//! ## Pipeline
//!
//! ```text
//! Trace directory
//!     │
//!     ├──> TraceCatalog / SliceStore (noctrace-store)
//!     │      └─> raw cumulative snapshots by slice id
//!     │
//!     ├──> RangeDecoder
//!     │      └─> per-edge windowed traffic for [start, end)
//!     │            (prefix-sum subtraction of two cumulative snapshots)
//!     │
//!     ├──> OverviewDensifier
//!     │      └─> complete slice × message-type grid for charting
//!     │
//!     └──> FilterEngine
//!            └─> per-edge scalar weights under a 4-dimensional filter
//! ```
//!
//! The [`TraceSource`] trait is the capability set exposed to collaborators;
//! [`LocalTraceSource`] is its local-directory-backed implementation.
//!
//! ## Example
//!
//! ```no_run
//! use noctrace_engine::{FilterEngine, LocalTraceSource, TraceSource};
//!
//! #[tokio::main]
//! async fn main() -> noctrace_engine::Result<()> {
//!     let mut source = LocalTraceSource::new("/path/to/trace");
//!     let meta = source.initialize().await?;
//!
//!     let window = source.windowed_traffic(0, meta.elapse as i64).await?;
//!     let mut filter = FilterEngine::new();
//!     for edge in filter.aggregate(&window) {
//!         println!("{} -> {}: {}", edge.source, edge.target, edge.weight);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod filter;
mod overview;
mod range;
mod source;

pub use error::{EngineError, Result};
pub use filter::{ClassificationMode, EdgeWeight, FilterDimension, FilterEngine};
pub use overview::densify_overview;
pub use range::RangeDecoder;
pub use source::{LocalTraceSource, TraceSource, HISTORY_COUNT_DIVISOR};
