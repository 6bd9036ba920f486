use std::collections::HashMap;

/// Boolean predicate over one classification dimension, keyed by the
/// dimension's string values. Absent keys evaluate to false.
///
/// Tables are replaced wholesale whenever the selection changes, never
/// mutated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruthTable {
    entries: HashMap<String, bool>,
}

impl TruthTable {
    /// Build a table covering `full_domain`, with exactly the `selected`
    /// values enabled. A selected value outside the domain is still recorded
    /// as enabled; it simply never matches anything.
    pub fn from_selected<S, D>(selected: &[S], full_domain: &[D]) -> Self
    where
        S: AsRef<str>,
        D: AsRef<str>,
    {
        let mut entries: HashMap<String, bool> = full_domain
            .iter()
            .map(|v| (v.as_ref().to_string(), false))
            .collect();
        for v in selected {
            entries.insert(v.as_ref().to_string(), true);
        }
        Self { entries }
    }

    /// All-true table over `domain`.
    pub fn all_of<D: AsRef<str>>(domain: &[D]) -> Self {
        Self::from_selected(domain, domain)
    }

    pub fn allows(&self, value: &str) -> bool {
        self.entries.get(value).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
