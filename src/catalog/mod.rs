//! Registry mapping human-readable node type names (e.g. `"Math: Add"`) to node shapes.
//!
//! The set of built-in names is the contract between the catalog and the code
//! generator. Entries registered at runtime compile to the `undefined` sentinel
//! unless their kind is one the generator knows.

use crate::graph::{Category, Graph, NodeId, NodeKind, PortSpec};
use ahash::AHashMap;
use itertools::Itertools;

mod builtin;

use builtin::register_builtin_nodes;

/// Everything needed to instantiate a node.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    pub category: Category,
    pub kind: NodeKind,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
}

impl CatalogEntry {
    /// The catalog key, `"<Category>: <Title>"`.
    pub fn name(&self) -> String {
        format!("{}: {}", self.category, self.title)
    }

    /// An entry for a node the generator has no dedicated case for.
    pub fn custom(
        category: Category,
        title: impl Into<String>,
        inputs: Vec<PortSpec>,
        outputs: Vec<PortSpec>,
    ) -> Self {
        let title = title.into();
        Self {
            kind: NodeKind::Custom(title.clone()),
            title,
            category,
            inputs,
            outputs,
        }
    }
}

pub struct NodeCatalog {
    entries: AHashMap<String, CatalogEntry>,
}

impl Default for NodeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeCatalog {
    /// A catalog holding every built-in node.
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        register_builtin_nodes(&mut catalog);
        catalog
    }

    pub fn empty() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Adds or replaces an entry under its `"<Category>: <Title>"` name.
    pub fn register(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.name(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entry names grouped by category, sorted for menus.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiates the named entry in `graph`. Returns `None` for unknown names.
    pub fn spawn(&self, graph: &mut Graph, name: &str, position: (f32, f32)) -> Option<NodeId> {
        let entry = self.get(name)?;
        Some(graph.add_node(
            entry.title.clone(),
            entry.category,
            entry.kind.clone(),
            position,
            entry.inputs.clone(),
            entry.outputs.clone(),
        ))
    }
}
