use indextree::NodeId;
use log::warn;
use std::collections::HashMap;

/// Mapping from dependency name to the elements that declared it through the
/// reference attribute.
///
/// Per-name order is document order and is significant: reconciliation pairs
/// old and new entries positionally. A name may back several elements and one
/// element may appear under several names.
#[derive(Debug, Clone, Default)]
pub struct DependencyMap {
    entries: HashMap<String, Vec<NodeId>>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to a name's list, creating the entry on first use.
    pub fn push(&mut self, name: &str, node: NodeId) {
        self.entries.entry(name.to_string()).or_default().push(node);
    }

    /// Elements registered under `name`, in document order. Unknown names
    /// yield an empty slice.
    pub fn get(&self, name: &str) -> &[NodeId] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Repoint the positional entry `name[index]` at a new element. An
    /// out-of-range position is map drift, logged and skipped.
    pub fn set(&mut self, name: &str, index: usize, node: NodeId) {
        match self
            .entries
            .get_mut(name)
            .and_then(|nodes| nodes.get_mut(index))
        {
            Some(slot) => *slot = node,
            None => warn!("no dependency entry to repoint: {name}[{index}]"),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct dependency names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
