//! Accumulates the dependency edges reported for each module version.

use std::collections::{HashMap, HashSet};

use modgraph_core::dependency::DependencyResult;
use modgraph_core::id::ModuleVersionId;

use crate::assembler::GraphAssembler;
use crate::error::GraphError;
use crate::graph::ResolutionResult;

/// Edges reported for one module: insertion-ordered, structurally deduplicated.
#[derive(Debug, Default)]
struct RecordedEdges {
    ordered: Vec<DependencyResult>,
    seen: HashSet<DependencyResult>,
}

impl RecordedEdges {
    fn extend(&mut self, edges: impl IntoIterator<Item = DependencyResult>) -> usize {
        let before = self.ordered.len();
        for edge in edges {
            if self.seen.insert(edge.clone()) {
                self.ordered.push(edge);
            }
        }
        self.ordered.len() - before
    }
}

/// Per-module edge accumulator fed by the resolver while it walks the
/// dependency space.
///
/// Single writer: callers that resolve concurrently must serialise calls to
/// [`EdgeCollector::record`].
#[derive(Debug, Default)]
pub struct EdgeCollector {
    root: Option<ModuleVersionId>,
    edges: HashMap<ModuleVersionId, RecordedEdges>,
}

impl EdgeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the module the result graph will be rooted at.
    pub fn start(&mut self, root: ModuleVersionId) {
        if let Some(previous) = &self.root {
            tracing::warn!("collector restarted: root {previous} replaced by {root}");
        }
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<&ModuleVersionId> {
        self.root.as_ref()
    }

    /// Merge `edges` into the set recorded for `id`.
    ///
    /// Repeated calls for the same id add to the existing set; an edge equal
    /// to one already recorded keeps its first position. Leaves must be
    /// recorded with an empty iterator.
    pub fn record(
        &mut self,
        id: ModuleVersionId,
        edges: impl IntoIterator<Item = DependencyResult>,
    ) {
        let entry = self.edges.entry(id).or_default();
        let added = entry.extend(edges);
        tracing::trace!("recorded {added} new edges ({} total)", entry.ordered.len());
    }

    /// Edges recorded for `id`, or `None` if it was never recorded.
    pub fn edges_of(&self, id: &ModuleVersionId) -> Option<&[DependencyResult]> {
        self.edges.get(id).map(|e| e.ordered.as_slice())
    }

    pub fn contains(&self, id: &ModuleVersionId) -> bool {
        self.edges.contains_key(id)
    }

    /// Number of distinct module ids recorded.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Assemble the result graph from everything recorded so far.
    ///
    /// Only meaningful once the resolver has finished reporting; an earlier
    /// call sees just the edges recorded up to that point.
    pub fn result(&self) -> Result<ResolutionResult, GraphError> {
        let root = self.root.as_ref().ok_or(GraphError::NotStarted)?;
        GraphAssembler::new(self).assemble(root)
    }
}
