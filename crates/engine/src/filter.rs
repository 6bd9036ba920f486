use noctrace_model::{
    channel_domain, data_or_command, hop_domain, message_group, Meta, RangeResponse, TruthTable,
    DATA_OR_COMMAND, MSG_GROUPS, MSG_TYPES, TRANSFER_TYPES,
};
use std::time::Instant;

/// Which coarse classification the message dimension filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationMode {
    ByGroup,
    ByDataOrCommand,
}

/// The four independently-toggleable filter dimensions, plus the two
/// interchangeable message classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    TransferType,
    HopUnit,
    MessageGroup,
    DataOrCommand,
    Channel,
}

/// Per-edge aggregation result handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeWeight {
    pub source: String,
    pub target: String,
    pub detail: String,
    pub weight: f64,
}

/// Reduces each edge's packed vector to a scalar weight under a
/// four-dimensional boolean filter.
///
/// The aggregation walk visits every (transfer type, hop unit, message type,
/// channel) combination exactly once in canonical mixed-radix order and
/// advances the linear vector index on every combination regardless of
/// predicate outcome: the vector was populated with this same unconditional
/// stride, so a skipped increment would misalign all subsequent reads.
///
/// The hop and channel domains are properties of the trace, not known at
/// construction; their all-true default tables are derived lazily from the
/// first [`Meta`] seen. Truth tables are only ever replaced wholesale.
pub struct FilterEngine {
    mode: ClassificationMode,
    transfer_table: TruthTable,
    group_table: TruthTable,
    doc_table: TruthTable,
    hop_table: TruthTable,
    channel_table: TruthTable,
    meta_dims: Option<(u32, u32)>,
}

impl FilterEngine {
    pub fn new() -> Self {
        // Translation is excluded from the group default; every other
        // dimension starts all-true.
        let default_groups: Vec<&str> = MSG_GROUPS
            .iter()
            .copied()
            .filter(|g| *g != "Translation")
            .collect();
        Self {
            mode: ClassificationMode::ByGroup,
            transfer_table: TruthTable::all_of(&TRANSFER_TYPES),
            group_table: TruthTable::from_selected(&default_groups, &MSG_GROUPS),
            doc_table: TruthTable::all_of(&DATA_OR_COMMAND),
            hop_table: TruthTable::default(),
            channel_table: TruthTable::default(),
            meta_dims: None,
        }
    }

    pub fn classification_mode(&self) -> ClassificationMode {
        self.mode
    }

    pub fn set_classification_mode(&mut self, mode: ClassificationMode) {
        self.mode = mode;
    }

    /// Replace one dimension's truth table wholesale with `selected` enabled
    /// over the dimension's full domain.
    pub fn set_dimension_filter<S: AsRef<str>>(
        &mut self,
        dimension: FilterDimension,
        selected: &[S],
    ) {
        let table = TruthTable::from_selected(selected, &self.full_domain(dimension));
        match dimension {
            FilterDimension::TransferType => self.transfer_table = table,
            FilterDimension::HopUnit => self.hop_table = table,
            FilterDimension::MessageGroup => self.group_table = table,
            FilterDimension::DataOrCommand => self.doc_table = table,
            FilterDimension::Channel => self.channel_table = table,
        }
    }

    /// Aggregate each edge's packed vector into a scalar weight. Input edge
    /// order is preserved. Never fails: unknown dimension values filter out,
    /// and a short vector reads missing lanes as zero after a warning.
    pub fn aggregate(&mut self, response: &RangeResponse) -> Vec<EdgeWeight> {
        let started = Instant::now();
        let meta = &response.meta;
        self.ensure_trace_domains(meta);

        let transfer_ok: Vec<bool> = TRANSFER_TYPES
            .iter()
            .map(|t| self.transfer_table.allows(t))
            .collect();
        let hop_ok: Vec<bool> = hop_domain(meta.num_hop_units)
            .iter()
            .map(|h| self.hop_table.allows(h))
            .collect();
        let msg_ok: Vec<bool> = MSG_TYPES
            .iter()
            .map(|mt| match self.mode {
                ClassificationMode::ByGroup => self.group_table.allows(message_group(mt)),
                ClassificationMode::ByDataOrCommand => {
                    self.doc_table.allows(data_or_command(mt))
                }
            })
            .collect();
        let channel_ok: Vec<bool> = channel_domain(meta.num_channels)
            .iter()
            .map(|c| self.channel_table.allows(c))
            .collect();

        let expected = meta.vector_len();
        let mut out = Vec::with_capacity(response.edges.len());
        for edge in &response.edges {
            if edge.value.len() != expected {
                log::warn!(
                    "edge {} packed vector has {} lanes, expected {expected}; missing lanes read as zero",
                    edge.detail,
                    edge.value.len()
                );
            }

            let mut weight = 0.0;
            let mut index = 0usize;
            for &tt in &transfer_ok {
                for &hop in &hop_ok {
                    for &msg in &msg_ok {
                        for &ch in &channel_ok {
                            if tt && hop && msg && ch {
                                weight += edge.value.get(index).copied().unwrap_or(0.0);
                            }
                            // Always advance to stay aligned with the packed
                            // vector layout.
                            index += 1;
                        }
                    }
                }
            }

            out.push(EdgeWeight {
                source: edge.source.clone(),
                target: edge.target.clone(),
                detail: edge.detail.clone(),
                weight,
            });
        }

        log::debug!(
            "aggregated {} edges in {:?}",
            response.edges.len(),
            started.elapsed()
        );
        out
    }

    /// Fill the hop and channel tables from the first Meta seen. A table the
    /// caller already replaced is left alone.
    fn ensure_trace_domains(&mut self, meta: &Meta) {
        if self.meta_dims.is_none() {
            self.meta_dims = Some((meta.num_hop_units, meta.num_channels));
        }
        if self.hop_table.is_empty() {
            self.hop_table = TruthTable::all_of(&hop_domain(meta.num_hop_units));
        }
        if self.channel_table.is_empty() {
            self.channel_table = TruthTable::all_of(&channel_domain(meta.num_channels));
        }
    }

    fn full_domain(&self, dimension: FilterDimension) -> Vec<String> {
        let (num_hop_units, num_channels) = self.meta_dims.unwrap_or((1, 1));
        match dimension {
            FilterDimension::TransferType => {
                TRANSFER_TYPES.iter().map(|s| s.to_string()).collect()
            }
            FilterDimension::HopUnit => hop_domain(num_hop_units),
            FilterDimension::MessageGroup => MSG_GROUPS.iter().map(|s| s.to_string()).collect(),
            FilterDimension::DataOrCommand => {
                DATA_OR_COMMAND.iter().map(|s| s.to_string()).collect()
            }
            FilterDimension::Channel => channel_domain(num_channels),
        }
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noctrace_model::EdgeRecord;
    use pretty_assertions::assert_eq;

    fn meta(num_hop_units: u32, num_channels: u32) -> Meta {
        serde_json::from_value(serde_json::json!({
            "width": 2,
            "height": 1,
            "elapse": 3,
            "num_hop_units": num_hop_units,
            "num_channels": num_channels,
            "hops_per_unit": 4,
        }))
        .unwrap()
    }

    fn response(meta: Meta, values: Vec<Vec<f64>>) -> RangeResponse {
        let edges = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| EdgeRecord {
                source: i.to_string(),
                target: (i + 1).to_string(),
                value,
                detail: format!("{}->{}", i, i + 1),
            })
            .collect();
        RangeResponse {
            meta,
            nodes: Vec::new(),
            edges,
        }
    }

    #[test]
    fn all_true_filters_sum_the_whole_vector() {
        let meta = meta(2, 2);
        let len = meta.vector_len();
        let vector: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let expected: f64 = vector.iter().sum();

        let mut engine = FilterEngine::new();
        let weights = engine.aggregate(&response(meta, vec![vector]));

        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].weight, expected);
        assert_eq!(weights[0].detail, "0->1");
    }

    #[test]
    fn every_lane_is_visited_exactly_once() {
        // A vector of ones under all-true filters weighs exactly vector_len.
        let meta = meta(3, 2);
        let len = meta.vector_len();

        let mut engine = FilterEngine::new();
        let weights = engine.aggregate(&response(meta, vec![vec![1.0; len]]));

        assert_eq!(weights[0].weight, len as f64);
    }

    #[test]
    fn group_filter_selects_only_matching_message_lanes() {
        let meta = meta(1, 1);
        let len = meta.vector_len();

        let mut engine = FilterEngine::new();
        engine.set_dimension_filter(FilterDimension::MessageGroup, &["Read"]);
        let weights = engine.aggregate(&response(meta.clone(), vec![vec![1.0; len]]));

        // Per transfer type: DataReadyRsp and ReadReq are Read, the two
        // write types are not. 4 transfer types x 2 read lanes.
        assert_eq!(weights[0].weight, 8.0);
    }

    #[test]
    fn data_or_command_mode_uses_the_doc_table() {
        let meta = meta(1, 1);
        let len = meta.vector_len();

        let mut engine = FilterEngine::new();
        engine.set_classification_mode(ClassificationMode::ByDataOrCommand);
        engine.set_dimension_filter(FilterDimension::DataOrCommand, &["D"]);
        let weights = engine.aggregate(&response(meta, vec![vec![1.0; len]]));

        // DataReadyRsp and WriteReq carry data. 4 transfer types x 2 lanes.
        assert_eq!(weights[0].weight, 8.0);
        assert_eq!(engine.classification_mode(), ClassificationMode::ByDataOrCommand);
    }

    #[test]
    fn channel_filter_masks_interleaved_lanes() {
        let meta = meta(1, 2);
        let len = meta.vector_len();
        // Channel is the innermost dimension: even lanes are channel 0, odd
        // lanes channel 1.
        let vector: Vec<f64> = (0..len).map(|i| if i % 2 == 0 { 1.0 } else { 100.0 }).collect();

        let mut engine = FilterEngine::new();
        engine.aggregate(&response(meta.clone(), vec![vector.clone()]));
        engine.set_dimension_filter(FilterDimension::Channel, &["1"]);
        let weights = engine.aggregate(&response(meta, vec![vector]));

        assert_eq!(weights[0].weight, 100.0 * (len / 2) as f64);
    }

    #[test]
    fn transfer_filter_masks_leading_blocks() {
        let meta = meta(1, 1);
        let len = meta.vector_len();
        let block = len / TRANSFER_TYPES.len();

        let mut engine = FilterEngine::new();
        engine.set_dimension_filter(FilterDimension::TransferType, &["mesh_send"]);
        let weights = engine.aggregate(&response(meta, vec![vec![2.0; len]]));

        // Only the outermost block (mesh_send) survives.
        assert_eq!(weights[0].weight, 2.0 * block as f64);
    }

    #[test]
    fn filter_set_before_first_meta_survives_lazy_init() {
        let meta = meta(1, 2);
        let len = meta.vector_len();

        let mut engine = FilterEngine::new();
        engine.set_dimension_filter(FilterDimension::Channel, &["1"]);
        let weights = engine.aggregate(&response(meta, vec![vec![1.0; len]]));

        assert_eq!(weights[0].weight, (len / 2) as f64);
    }

    #[test]
    fn short_vector_reads_missing_lanes_as_zero() {
        let meta = meta(2, 1);
        let mut engine = FilterEngine::new();
        let weights = engine.aggregate(&response(meta, vec![vec![1.0; 3]]));

        assert_eq!(weights[0].weight, 3.0);
    }

    #[test]
    fn input_edge_order_is_preserved() {
        let meta = meta(1, 1);
        let len = meta.vector_len();
        let mut engine = FilterEngine::new();
        let weights = engine.aggregate(&response(
            meta,
            vec![vec![1.0; len], vec![2.0; len], vec![3.0; len]],
        ));

        let details: Vec<&str> = weights.iter().map(|w| w.detail.as_str()).collect();
        assert_eq!(details, vec!["0->1", "1->2", "2->3"]);
    }
}
