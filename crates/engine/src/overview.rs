use noctrace_model::{data_or_command, message_group, SnapshotSummaryRecord, MSG_TYPES};
use std::collections::BTreeMap;

/// Transfer-type tag carried by synthesized zero records (relay, a neutral
/// choice; the chart reads only the count).
const NEUTRAL_TRANSFER_TYPE: u32 = 1;

/// Expand a sparse, arbitrarily-ordered overview into the complete
/// `slice × message-type` grid, so downstream charting never sees a missing
/// bucket.
///
/// For every slice in `[0, elapse)`, existing records are kept untouched and
/// a zero-count record is synthesized for each missing message type, in
/// canonical type order. Records outside `[0, elapse)` are dropped. Output is
/// ordered ascending by slice, stable within a slice, and has exactly
/// `elapse × |message types|` entries when the input holds at most one record
/// per (slice, type) pair.
pub fn densify_overview(
    records: Vec<SnapshotSummaryRecord>,
    elapse: u32,
) -> Vec<SnapshotSummaryRecord> {
    let mut by_slice: BTreeMap<i64, Vec<SnapshotSummaryRecord>> = BTreeMap::new();
    for record in records {
        if record.slice < 0 || record.slice >= i64::from(elapse) {
            log::warn!(
                "dropping overview record for slice {} outside [0, {elapse})",
                record.slice
            );
            continue;
        }
        by_slice.entry(record.slice).or_default().push(record);
    }

    let mut dense = Vec::with_capacity(elapse as usize * MSG_TYPES.len());
    let mut filled = 0usize;
    for slice in 0..i64::from(elapse) {
        let have = by_slice.remove(&slice).unwrap_or_default();
        let present: Vec<String> = have.iter().map(|r| r.message_type.clone()).collect();
        dense.extend(have);
        for message_type in MSG_TYPES {
            if !present.iter().any(|t| t == message_type) {
                dense.push(zero_record(slice, message_type));
                filled += 1;
            }
        }
    }

    if filled > 0 {
        log::debug!("densified overview: synthesized {filled} zero records");
    }
    dense
}

fn zero_record(slice: i64, message_type: &str) -> SnapshotSummaryRecord {
    SnapshotSummaryRecord {
        slice,
        message_type: message_type.to_string(),
        message_group: message_group(message_type).to_string(),
        data_or_command: data_or_command(message_type).to_string(),
        count: 0.0,
        max_flits: 0.0,
        hop_units: 0.0,
        transfer_type: NEUTRAL_TRANSFER_TYPE,
    }
}
