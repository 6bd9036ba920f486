use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::OnceCell;

/// Reserved slice id of the all-zero fallback template (`-1.json`).
pub const ZERO_TEMPLATE_SLICE: i64 = -1;

/// Result of a slice lookup with fallback. Both fallback arms resolve to
/// "treat as no traffic"; the variants exist so callers can log which path
/// was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceContent {
    /// The requested slice file exists; its raw text.
    Exact(String),
    /// Slice missing, `-1.json` served instead.
    ZeroTemplate(String),
    /// Neither the slice nor the template exists.
    Empty,
}

impl SliceContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            SliceContent::Exact(t) | SliceContent::ZeroTemplate(t) => Some(t),
            SliceContent::Empty => None,
        }
    }
}

/// Index from integer slice id to snapshot file, built once per catalog scan.
///
/// Slice ids are parsed from file stems (`"37.json"` → 37), so the reserved
/// template lands at key [`ZERO_TEMPLATE_SLICE`].
#[derive(Debug, Default)]
pub struct SliceStore {
    by_slice: BTreeMap<i64, PathBuf>,
    zero_cache: OnceCell<Option<String>>,
}

impl SliceStore {
    pub(crate) fn insert(&mut self, slice: i64, path: PathBuf) {
        self.by_slice.insert(slice, path);
    }

    /// True iff `{slice}.json` was indexed. Existence only, no read.
    pub fn has_slice(&self, slice: i64) -> bool {
        self.by_slice.contains_key(&slice)
    }

    pub fn len(&self) -> usize {
        self.by_slice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slice.is_empty()
    }

    /// Raw text of `{slice}.json`, exact match only. A read failure on an
    /// indexed path is logged and treated as absence.
    pub async fn content_for(&self, slice: i64) -> Option<String> {
        let path = self.by_slice.get(&slice)?;
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                log::debug!("loaded edge slice {slice}: {}", path.display());
                Some(text)
            }
            Err(err) => {
                log::warn!("failed to read {}: {err}", path.display());
                None
            }
        }
    }

    /// Exact match, falling back to the `-1.json` zero template, falling back
    /// to [`SliceContent::Empty`]. Never fails; a sparse timeline is a normal
    /// state, not a fault.
    pub async fn content_for_or_zero(&self, slice: i64) -> SliceContent {
        if let Some(text) = self.content_for(slice).await {
            return SliceContent::Exact(text);
        }
        match self.zero_template().await {
            Some(text) => {
                log::warn!("slice {slice}.json missing; using -1.json fallback");
                SliceContent::ZeroTemplate(text.to_string())
            }
            None => {
                log::warn!("slice {slice}.json and -1.json missing; no slice data");
                SliceContent::Empty
            }
        }
    }

    /// Cached text of the `-1.json` zero template, if present.
    pub async fn zero_template(&self) -> Option<&str> {
        self.zero_cache
            .get_or_init(|| async {
                let path = self.by_slice.get(&ZERO_TEMPLATE_SLICE)?;
                match tokio::fs::read_to_string(path).await {
                    Ok(text) => Some(text),
                    Err(err) => {
                        log::warn!("failed to read zero template {}: {err}", path.display());
                        None
                    }
                }
            })
            .await
            .as_deref()
    }
}
