use crate::classification::{MSG_TYPES, TRANSFER_TYPES};
use serde::{Deserialize, Serialize};

/// Static trace metadata from `meta.json`. Immutable once loaded.
///
/// `elapse` bounds valid time-slice ids to `[0, elapse)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Mesh width in nodes.
    pub width: u32,
    /// Mesh height in nodes.
    pub height: u32,
    /// Number of recorded time slices.
    pub elapse: u32,
    /// Number of hop-distance buckets per packed vector.
    pub num_hop_units: u32,
    /// Number of physical channels; older traces omit the key.
    #[serde(default = "default_num_channels")]
    pub num_channels: u32,
    /// Router hops covered by one hop unit.
    pub hops_per_unit: u32,
    /// Optional display names for the channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_labels: Option<Vec<String>>,
}

fn default_num_channels() -> u32 {
    1
}

impl Meta {
    /// Length of every edge's packed traffic vector for this trace: one lane
    /// per (transfer type, hop unit, message type, channel) combination.
    /// Constant across all edges and all slices; any mismatch is a
    /// data-integrity violation.
    pub fn vector_len(&self) -> usize {
        TRANSFER_TYPES.len()
            * self.num_hop_units as usize
            * MSG_TYPES.len()
            * self.num_channels as usize
    }

    /// Channel display labels, falling back to `CH{i}` when `channel_labels`
    /// is absent or does not cover every channel.
    pub fn channel_label_list(&self) -> Vec<String> {
        match &self.channel_labels {
            Some(labels) if labels.len() == self.num_channels as usize => labels.clone(),
            _ => (0..self.num_channels).map(|i| format!("CH{i}")).collect(),
        }
    }
}
