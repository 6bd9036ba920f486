//! # NoC Trace Store
//!
//! Read-only access to a local trace directory.
//!
//! ```text
//! TraceCatalog::scan
//!     │
//!     ├──> named root files (meta.json, flat.json, nodes.json)
//!     │
//!     ├──> SliceStore (edge_prefix_sum/{slice}.json, keyed by slice id)
//!     │      └─> -1.json reserved as the all-zero fallback template
//!     │
//!     └──> edgehis/{name}.json history files
//! ```
//!
//! Sparse timelines are the expected steady state of a trace, so nothing in
//! this crate raises for missing data: absence is represented as a value
//! ([`Option`] or [`SliceContent`]), and a failed read is logged and treated
//! as absence rather than as a transient fault.

mod catalog;
mod slices;

pub use catalog::TraceCatalog;
pub use slices::{SliceContent, SliceStore, ZERO_TEMPLATE_SLICE};
