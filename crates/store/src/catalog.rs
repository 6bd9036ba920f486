use crate::slices::SliceStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EDGE_DIR: &str = "edge_prefix_sum";
const HISTORY_DIR: &str = "edgehis";

/// One-shot index over a local trace directory.
///
/// [`TraceCatalog::scan`] walks the tree once and records root-level named
/// JSON files, the per-slice snapshot files, and the optional per-edge
/// history files. Re-scanning a non-empty catalog is a no-op.
#[derive(Debug)]
pub struct TraceCatalog {
    root: PathBuf,
    named: HashMap<String, PathBuf>,
    history: HashMap<String, PathBuf>,
    slices: SliceStore,
}

impl TraceCatalog {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            named: HashMap::new(),
            history: HashMap::new(),
            slices: SliceStore::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Index every JSON file under the trace root. Idempotent: once any entry
    /// has been indexed, later calls return immediately.
    pub fn scan(&mut self) {
        if !self.named.is_empty() || !self.history.is_empty() || !self.slices.is_empty() {
            return;
        }

        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("failed to read directory entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match parent_dir_name(path, &self.root) {
                Some(EDGE_DIR) => match stem.parse::<i64>() {
                    Ok(slice) => self.slices.insert(slice, path.to_path_buf()),
                    Err(_) => log::warn!("skipping {}: stem is not a slice id", path.display()),
                },
                Some(HISTORY_DIR) => {
                    self.history.insert(stem.to_string(), path.to_path_buf());
                }
                None => {
                    self.named.insert(stem.to_string(), path.to_path_buf());
                }
                Some(_) => {}
            }
        }

        log::info!(
            "indexed trace at {}: {} named files, {} slices, {} histories",
            self.root.display(),
            self.named.len(),
            self.slices.len(),
            self.history.len()
        );
    }

    pub fn slices(&self) -> &SliceStore {
        &self.slices
    }

    /// Text of a root-level file by stem (`"meta"` → `meta.json`), or `None`
    /// if it was never indexed or cannot be read.
    pub async fn named_content(&self, name: &str) -> Option<String> {
        read_indexed(&self.named, name).await
    }

    /// Text of `edgehis/{name}.json`, read on demand.
    pub async fn history_content(&self, name: &str) -> Option<String> {
        read_indexed(&self.history, name).await
    }
}

/// Directory name of `path`'s parent relative to `root`; `None` when the file
/// sits directly at the root.
fn parent_dir_name<'a>(path: &'a Path, root: &Path) -> Option<&'a str> {
    let parent = path.parent()?;
    if parent == root {
        return None;
    }
    parent.file_name()?.to_str()
}

async fn read_indexed(index: &HashMap<String, PathBuf>, name: &str) -> Option<String> {
    let path = index.get(name)?;
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            log::debug!("loaded {}", path.display());
            Some(text)
        }
        Err(err) => {
            log::warn!("failed to read {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slices::{SliceContent, ZERO_TEMPLATE_SLICE};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn write_trace(root: &Path, slices: &[(i64, &str)]) {
        let edges = root.join(EDGE_DIR);
        fs::create_dir_all(&edges).unwrap();
        for (slice, content) in slices {
            fs::write(edges.join(format!("{slice}.json")), content).unwrap();
        }
        fs::write(root.join("meta.json"), r#"{"width":2}"#).unwrap();
    }

    #[tokio::test]
    async fn indexes_slices_by_file_stem() {
        let temp = tempdir().unwrap();
        write_trace(temp.path(), &[(0, "[]"), (2, "[]"), (ZERO_TEMPLATE_SLICE, "[]")]);

        let mut catalog = TraceCatalog::new(temp.path());
        catalog.scan();

        assert!(catalog.slices().has_slice(0));
        assert!(!catalog.slices().has_slice(1));
        assert!(catalog.slices().has_slice(2));
        assert!(catalog.slices().has_slice(ZERO_TEMPLATE_SLICE));
        assert_eq!(catalog.slices().len(), 3);
        assert_eq!(catalog.named_content("meta").await.unwrap(), r#"{"width":2}"#);
        assert_eq!(catalog.named_content("flat").await, None);
    }

    #[tokio::test]
    async fn missing_slice_falls_back_to_zero_template() {
        let temp = tempdir().unwrap();
        write_trace(temp.path(), &[(0, "[1]"), (ZERO_TEMPLATE_SLICE, "[0]")]);

        let mut catalog = TraceCatalog::new(temp.path());
        catalog.scan();
        let slices = catalog.slices();

        assert_eq!(
            slices.content_for_or_zero(0).await,
            SliceContent::Exact("[1]".into())
        );
        assert_eq!(
            slices.content_for_or_zero(7).await,
            SliceContent::ZeroTemplate("[0]".into())
        );
    }

    #[tokio::test]
    async fn empty_when_template_is_also_missing() {
        let temp = tempdir().unwrap();
        write_trace(temp.path(), &[(0, "[1]")]);

        let mut catalog = TraceCatalog::new(temp.path());
        catalog.scan();

        assert_eq!(catalog.slices().content_for(5).await, None);
        assert_eq!(catalog.slices().content_for_or_zero(5).await, SliceContent::Empty);
    }

    #[tokio::test]
    async fn rescan_of_nonempty_catalog_is_a_noop() {
        let temp = tempdir().unwrap();
        write_trace(temp.path(), &[(0, "[]")]);

        let mut catalog = TraceCatalog::new(temp.path());
        catalog.scan();
        assert_eq!(catalog.slices().len(), 1);

        fs::write(temp.path().join(EDGE_DIR).join("9.json"), "[]").unwrap();
        catalog.scan();
        assert!(!catalog.slices().has_slice(9));
    }

    #[tokio::test]
    async fn history_files_are_served_by_stem() {
        let temp = tempdir().unwrap();
        let his = temp.path().join(HISTORY_DIR);
        fs::create_dir_all(&his).unwrap();
        fs::write(his.join("0->1.json"), "[]").unwrap();

        let mut catalog = TraceCatalog::new(temp.path());
        catalog.scan();

        assert_eq!(catalog.history_content("0->1").await.unwrap(), "[]");
        assert_eq!(catalog.history_content("1->0").await, None);
    }

    #[tokio::test]
    async fn non_slice_names_under_edge_dir_are_skipped() {
        let temp = tempdir().unwrap();
        write_trace(temp.path(), &[(0, "[]")]);
        fs::write(temp.path().join(EDGE_DIR).join("readme.json"), "{}").unwrap();

        let mut catalog = TraceCatalog::new(temp.path());
        catalog.scan();

        assert_eq!(catalog.slices().len(), 1);
    }
}
