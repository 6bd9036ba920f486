use crate::error::{EngineError, Result};
use noctrace_model::{EdgeRecord, Meta};
use noctrace_store::{SliceContent, SliceStore};

/// Decodes a half-open time window `[start, end)` into per-edge windowed
/// traffic.
///
/// Slice files hold cumulative totals from time zero, so the window is the
/// elementwise difference of the snapshots at `end - 1` and `start - 1`.
/// A `start` of zero needs no subtraction; a missing `start - 1` snapshot is
/// treated as a zero boundary (counters are non-decreasing).
pub struct RangeDecoder<'a> {
    meta: &'a Meta,
    store: &'a SliceStore,
}

impl<'a> RangeDecoder<'a> {
    pub fn new(meta: &'a Meta, store: &'a SliceStore) -> Self {
        Self { meta, store }
    }

    /// Windowed per-edge traffic for `[start, end)`.
    ///
    /// The sentinel pair `(0, 0)` means "no window selected" and yields the
    /// all-zero edge set without touching any slice content. Any other window
    /// must satisfy `0 <= start < end <= elapse`.
    pub async fn windowed_edges(&self, start: i64, end: i64) -> Result<Vec<EdgeRecord>> {
        if start == 0 && end == 0 {
            return self.zero_edges().await;
        }
        if end > i64::from(self.meta.elapse) || start >= end || start < 0 {
            return Err(EngineError::WindowOutOfRange {
                start,
                end,
                elapse: self.meta.elapse,
            });
        }

        let end_slice = end - 1;
        let mut edges = match self.store.content_for_or_zero(end_slice).await {
            SliceContent::Exact(text) => self.parse_edges(&text, end_slice)?,
            SliceContent::ZeroTemplate(text) => {
                self.parse_edges(&text, noctrace_store::ZERO_TEMPLATE_SLICE)?
            }
            SliceContent::Empty => {
                log::warn!("no slice data for window end {end_slice}; synthesizing zero grid");
                self.grid_edges()
            }
        };

        if start > 0 {
            let start_slice = start - 1;
            match self.store.content_for(start_slice).await {
                Some(text) => {
                    let earlier = self.parse_edges(&text, start_slice)?;
                    // Edges are matched by position: slice files for the same
                    // topology share one edge ordering. An earlier list that
                    // is shorter leaves the unmatched tail untouched.
                    for (edge, prev) in edges.iter_mut().zip(earlier.iter()) {
                        for (v, pv) in edge.value.iter_mut().zip(prev.value.iter()) {
                            *v -= pv;
                        }
                    }
                }
                None => {
                    log::debug!(
                        "slice {start_slice}.json missing; window start treated as zero boundary"
                    );
                }
            }
        }

        Ok(edges)
    }

    /// All-zero edge set matching the topology: the zero template with its
    /// vectors re-zeroed, or the synthesized grid when no template exists.
    pub async fn zero_edges(&self) -> Result<Vec<EdgeRecord>> {
        match self.store.zero_template().await {
            Some(text) => {
                let mut edges =
                    self.parse_edges(text, noctrace_store::ZERO_TEMPLATE_SLICE)?;
                for edge in &mut edges {
                    edge.value = vec![0.0; edge.value.len()];
                }
                Ok(edges)
            }
            None => Ok(self.grid_edges()),
        }
    }

    /// Last-resort zero topology when the directory holds no slice data at
    /// all: every node connects to its in-bounds 4-neighbors.
    fn grid_edges(&self) -> Vec<EdgeRecord> {
        let width = i64::from(self.meta.width);
        let height = i64::from(self.meta.height);
        let zeros = vec![0.0; self.meta.vector_len()];

        let mut edges = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let id = y * width + x;
                let neighbors = [(x, y + 1), (x + 1, y), (x, y - 1), (x - 1, y)];
                for (nx, ny) in neighbors {
                    if nx < 0 || nx >= width || ny < 0 || ny >= height {
                        continue;
                    }
                    let nid = ny * width + nx;
                    edges.push(EdgeRecord {
                        source: id.to_string(),
                        target: nid.to_string(),
                        value: zeros.clone(),
                        detail: format!("{id}->{nid}"),
                    });
                }
            }
        }
        edges
    }

    fn parse_edges(&self, text: &str, slice: i64) -> Result<Vec<EdgeRecord>> {
        let file = format!("edge_prefix_sum/{slice}.json");
        let edges: Vec<EdgeRecord> =
            serde_json::from_str(text).map_err(|source| EngineError::Format {
                file: file.clone(),
                source,
            })?;

        let expected = self.meta.vector_len();
        for edge in &edges {
            if edge.value.len() != expected {
                return Err(EngineError::VectorLength {
                    file,
                    edge: edge.detail.clone(),
                    expected,
                    actual: edge.value.len(),
                });
            }
        }
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(width: u32, height: u32) -> Meta {
        serde_json::from_value(serde_json::json!({
            "width": width,
            "height": height,
            "elapse": 3,
            "num_hop_units": 1,
            "num_channels": 1,
            "hops_per_unit": 4,
        }))
        .unwrap()
    }

    #[test]
    fn grid_connects_in_bounds_neighbors_only() {
        let meta = meta(2, 1);
        let store = SliceStore::default();
        let decoder = RangeDecoder::new(&meta, &store);

        let edges = decoder.grid_edges();
        let details: Vec<&str> = edges.iter().map(|e| e.detail.as_str()).collect();

        assert_eq!(details, vec!["0->1", "1->0"]);
        for edge in &edges {
            assert_eq!(edge.value.len(), meta.vector_len());
            assert!(edge.value.iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn grid_interior_node_has_four_neighbors() {
        let meta = meta(3, 3);
        let store = SliceStore::default();
        let decoder = RangeDecoder::new(&meta, &store);

        let edges = decoder.grid_edges();
        let from_center = edges.iter().filter(|e| e.source == "4").count();
        let from_corner = edges.iter().filter(|e| e.source == "0").count();

        assert_eq!(from_center, 4);
        assert_eq!(from_corner, 2);
        // Directed both ways: total edge count is even and symmetric.
        assert_eq!(edges.len(), 24);
    }

    #[test]
    fn vector_length_mismatch_is_rejected() {
        let meta = meta(2, 1);
        let store = SliceStore::default();
        let decoder = RangeDecoder::new(&meta, &store);

        let text = r#"[{"source":"0","target":"1","value":[1,2,3],"detail":"0->1"}]"#;
        let err = decoder.parse_edges(text, 0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::VectorLength { expected: 16, actual: 3, .. }
        ));
    }
}
