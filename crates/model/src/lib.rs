//! # NoC Trace Model
//!
//! Wire-compatible data model for recorded network-on-chip traffic traces.
//!
//! A trace directory holds per-time-slice cumulative snapshots plus static
//! topology and metadata:
//!
//! ```text
//! trace/
//!     ├── meta.json               grid size, elapse, vector dimensions
//!     ├── nodes.json              opaque topology nodes (passed through)
//!     ├── flat.json               sparse per-slice, per-message-type summary
//!     ├── edge_prefix_sum/
//!     │     ├── {slice}.json      cumulative per-edge packed vectors
//!     │     └── -1.json           reserved all-zero template
//!     └── edgehis/{name}.json     optional per-edge history
//! ```
//!
//! This crate defines the serde shapes for those files, the four fixed
//! classification dimensions that index each edge's packed vector, and the
//! [`TruthTable`] used to filter over them. It performs no I/O.

mod classification;
mod edge;
mod meta;
mod overview;
mod truth;

pub use classification::{
    channel_domain, data_or_command, data_or_command_label, hop_domain, message_group,
    message_type_index, transfer_type_label, DATA_OR_COMMAND, MSG_GROUPS, MSG_TYPES,
    TRANSFER_TYPES,
};
pub use edge::{EdgeRecord, NodeRecord, RangeResponse};
pub use meta::Meta;
pub use overview::SnapshotSummaryRecord;
pub use truth::TruthTable;
