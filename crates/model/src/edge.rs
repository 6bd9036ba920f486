use crate::meta::Meta;
use serde::{Deserialize, Serialize};

/// Topology nodes are opaque to the engine and passed through unmodified.
pub type NodeRecord = serde_json::Value;

/// One directed link's traffic, from `edge_prefix_sum/{slice}.json`.
///
/// `value` is the packed vector: [`Meta::vector_len`] lanes, one per
/// (transfer type, hop unit, message type, channel) combination in canonical
/// mixed-radix order, most-significant dimension first. Cumulative from time
/// zero as stored on disk; windowed after range decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub value: Vec<f64>,
    pub detail: String,
}

/// A decoded time window: static metadata and topology plus the per-edge
/// windowed traffic for `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeResponse {
    pub meta: Meta,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}
