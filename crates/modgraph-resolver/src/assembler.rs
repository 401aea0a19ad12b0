//! Depth-first assembly of collected edges into a result graph.

use std::collections::HashSet;

use modgraph_core::dependency::DependencyResult;
use modgraph_core::id::ModuleVersionId;
use petgraph::graph::NodeIndex;

use crate::collector::EdgeCollector;
use crate::error::GraphError;
use crate::graph::{GraphBuilder, ResolutionResult};

/// A module whose outgoing edges are being attached.
struct Frame<'c> {
    node: NodeIndex,
    edges: &'c [DependencyResult],
    cursor: usize,
}

/// Builds a [`ResolutionResult`] from a finished [`EdgeCollector`].
///
/// Each module id is instantiated exactly once, on first visit, and its
/// edges are expanded exactly once. Reaching an id that already has a node
/// (an ancestor still being expanded, or a module reached earlier through
/// another path) reuses that node without descending again, so cycles
/// terminate and the work stack is bounded by the number of distinct modules.
pub struct GraphAssembler<'c> {
    collector: &'c EdgeCollector,
}

impl<'c> GraphAssembler<'c> {
    pub fn new(collector: &'c EdgeCollector) -> Self {
        Self { collector }
    }

    /// Assemble the graph reachable from `root`.
    ///
    /// Fails with [`GraphError::UnregisteredNode`] as soon as traversal
    /// reaches an id with no recorded edges; nothing is returned in that case.
    pub fn assemble(&self, root: &ModuleVersionId) -> Result<ResolutionResult, GraphError> {
        let mut builder = GraphBuilder::new();
        let root_frame = self.instantiate(&mut builder, root)?;
        let root_idx = root_frame.node;

        let mut on_path: HashSet<NodeIndex> = HashSet::from([root_idx]);
        let mut stack = vec![root_frame];

        while let Some(frame) = stack.last() {
            let (source, edges, cursor) = (frame.node, frame.edges, frame.cursor);
            let Some(dependency) = edges.get(cursor) else {
                on_path.remove(&source);
                stack.pop();
                continue;
            };

            // A resolved edge is attached only once its target exists. A new
            // target is expanded first; this edge is attached when `source`
            // resumes at the same cursor.
            let target = match dependency.selected() {
                Some(target_id) => match builder.lookup(target_id) {
                    Some(existing) => {
                        if on_path.contains(&existing) {
                            tracing::debug!(
                                "cycle closed: {} -> {target_id}",
                                builder.id(source)
                            );
                        }
                        Some(existing)
                    }
                    None => {
                        let child = self.instantiate(&mut builder, target_id)?;
                        on_path.insert(child.node);
                        stack.push(child);
                        continue;
                    }
                },
                None => None,
            };

            builder.attach(source, dependency.clone(), target);
            if let Some(frame) = stack.last_mut() {
                frame.cursor += 1;
            }
        }

        let result = builder.finish(root_idx);
        tracing::info!(
            "assembled {} modules with {} dependencies from root {root}",
            result.len(),
            result.dependency_count()
        );
        Ok(result)
    }

    /// Create the node for `id` and look up the edges it will expand.
    fn instantiate(
        &self,
        builder: &mut GraphBuilder,
        id: &ModuleVersionId,
    ) -> Result<Frame<'c>, GraphError> {
        let edges = self
            .collector
            .edges_of(id)
            .ok_or_else(|| GraphError::UnregisteredNode { id: id.clone() })?;
        let node = builder.add_module(id.clone());
        tracing::debug!("instantiated {id} with {} recorded edges", edges.len());
        Ok(Frame {
            node,
            edges,
            cursor: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ModuleVersionId {
        ModuleVersionId::parse(s).unwrap()
    }

    #[test]
    fn chain_deeper_than_call_stack_would_allow() {
        let mut c = EdgeCollector::new();
        let depth = 50_000;
        let ids: Vec<ModuleVersionId> = (0..depth).map(|i| id(&format!("g:m{i}:1"))).collect();
        for pair in ids.windows(2) {
            c.record(pair[0].clone(), [DependencyResult::to(pair[1].clone())]);
        }
        c.record(ids[depth - 1].clone(), [DependencyResult::to(ids[0].clone())]);

        let result = GraphAssembler::new(&c).assemble(&ids[0]).unwrap();
        assert_eq!(result.len(), depth);
        let root = result.root();
        assert_eq!(root.dependees().len(), 1);
        assert_eq!(root.dependees()[0].id(), &ids[depth - 1]);
    }

    #[test]
    fn self_edge_is_its_own_dependee() {
        let mut c = EdgeCollector::new();
        c.record(id("g:a:1"), [DependencyResult::to(id("g:a:1"))]);
        let result = GraphAssembler::new(&c).assemble(&id("g:a:1")).unwrap();
        let a = result.root();
        assert_eq!(result.len(), 1);
        assert_eq!(a.dependencies().len(), 1);
        assert_eq!(a.dependees(), vec![a]);
    }
}
