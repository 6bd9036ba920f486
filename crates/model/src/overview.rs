use serde::{Deserialize, Deserializer, Serialize};

/// One coarse per-slice, per-message-type count from `flat.json`.
///
/// Independent of the packed vector; feeds the overview chart. Field names
/// mirror the wire format (`id`, `type`, `group`, `doc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummaryRecord {
    /// Time-slice id. Some traces serialize it as a JSON string.
    #[serde(rename = "id", deserialize_with = "slice_id_from_number_or_string")]
    pub slice: i64,
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(rename = "group")]
    pub message_group: String,
    /// `"D"` or `"C"`.
    #[serde(rename = "doc")]
    pub data_or_command: String,
    pub count: f64,
    #[serde(default)]
    pub max_flits: f64,
    #[serde(default)]
    pub hop_units: f64,
    #[serde(default)]
    pub transfer_type: u32,
}

fn slice_id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
