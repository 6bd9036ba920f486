use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Transfer types in canonical packed-vector order (outermost dimension).
pub const TRANSFER_TYPES: [&str; 4] = ["mesh_send", "mesh_relay", "mesh_recv", "peripheral"];

/// Message types in canonical packed-vector order.
pub const MSG_TYPES: [&str; 4] = [
    "*mem.DataReadyRsp",
    "*mem.ReadReq",
    "*mem.WriteDoneRsp",
    "*mem.WriteReq",
];

/// Coarse message groups, the default classification dimension.
pub const MSG_GROUPS: [&str; 4] = ["Translation", "Read", "Write", "Others"];

/// The alternative coarse classification: data payload vs. command.
pub const DATA_OR_COMMAND: [&str; 2] = ["D", "C"];

static MSG_GROUP_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("*mem.DataReadyRsp", "Read"),
        ("*mem.ReadReq", "Read"),
        ("*mem.WriteDoneRsp", "Write"),
        ("*mem.WriteReq", "Write"),
    ])
});

static DATA_OR_COMMAND_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("*mem.DataReadyRsp", "D"),
        ("*mem.ReadReq", "C"),
        ("*mem.WriteDoneRsp", "C"),
        ("*mem.WriteReq", "D"),
    ])
});

static MSG_TYPE_INDEX: Lazy<HashMap<&'static str, usize>> =
    Lazy::new(|| MSG_TYPES.iter().enumerate().map(|(i, t)| (*t, i)).collect());

/// Total map from message type to its group; unknown types classify as `Others`.
pub fn message_group(message_type: &str) -> &'static str {
    MSG_GROUP_MAP.get(message_type).copied().unwrap_or("Others")
}

/// Total map from message type to its data/command tag; unknown types classify as `C`.
pub fn data_or_command(message_type: &str) -> &'static str {
    DATA_OR_COMMAND_MAP
        .get(message_type)
        .copied()
        .unwrap_or("C")
}

/// Position of a message type within the canonical order, if known.
pub fn message_type_index(message_type: &str) -> Option<usize> {
    MSG_TYPE_INDEX.get(message_type).copied()
}

/// Display label for a transfer type.
pub fn transfer_type_label(transfer_type: &str) -> &'static str {
    match transfer_type {
        "mesh_send" => "TX",
        "mesh_relay" => "Relay",
        "mesh_recv" => "RX",
        "peripheral" => "Outside NoC",
        other => {
            log::warn!("unknown transfer type {other:?}");
            "Unknown"
        }
    }
}

/// Display label for a data/command tag.
pub fn data_or_command_label(tag: &str) -> &'static str {
    match tag {
        "D" => "Data",
        "C" => "Command",
        other => {
            log::warn!("unknown data/command tag {other:?}");
            "Invalid"
        }
    }
}

/// Hop-unit dimension domain, `0..num_hop_units` as decimal strings.
pub fn hop_domain(num_hop_units: u32) -> Vec<String> {
    (0..num_hop_units).map(|h| h.to_string()).collect()
}

/// Channel dimension domain, `0..num_channels` as decimal strings.
pub fn channel_domain(num_channels: u32) -> Vec<String> {
    (0..num_channels).map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_message_type_classifies_into_both_dimensions() {
        for mt in MSG_TYPES {
            assert!(MSG_GROUPS.contains(&message_group(mt)));
            assert!(DATA_OR_COMMAND.contains(&data_or_command(mt)));
        }
    }

    #[test]
    fn unknown_message_type_gets_explicit_defaults() {
        assert_eq!(message_group("*vm.TranslationReq"), "Others");
        assert_eq!(data_or_command("*vm.TranslationReq"), "C");
        assert_eq!(message_type_index("*vm.TranslationReq"), None);
    }

    #[test]
    fn canonical_index_matches_declaration_order() {
        assert_eq!(message_type_index("*mem.DataReadyRsp"), Some(0));
        assert_eq!(message_type_index("*mem.WriteReq"), Some(3));
    }

    #[test]
    fn display_labels_cover_both_dimensions() {
        assert_eq!(transfer_type_label("mesh_send"), "TX");
        assert_eq!(transfer_type_label("peripheral"), "Outside NoC");
        assert_eq!(transfer_type_label("bogus"), "Unknown");
        assert_eq!(data_or_command_label("D"), "Data");
        assert_eq!(data_or_command_label("C"), "Command");
        assert_eq!(data_or_command_label("X"), "Invalid");
    }

    #[test]
    fn integer_domains_are_decimal_strings() {
        assert_eq!(hop_domain(3), vec!["0", "1", "2"]);
        assert_eq!(channel_domain(1), vec!["0"]);
        assert!(channel_domain(0).is_empty());
    }
}
