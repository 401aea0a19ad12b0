//! The assembled resolution result and read-only views over its modules.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use modgraph_core::dependency::DependencyResult;
use modgraph_core::id::ModuleVersionId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// Back-reference from a selected module to the edge that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IncomingEdge {
    from: NodeIndex,
    /// Position of the selecting edge in `from`'s dependency list.
    edge: usize,
}

/// Storage for one module version.
#[derive(Debug)]
struct ModuleSlot {
    id: ModuleVersionId,
    dependencies: Vec<DependencyResult>,
    incoming: Vec<IncomingEdge>,
}

/// Mutable graph used only while the assembler runs.
///
/// Graph edges mirror resolved dependencies (source -> selected module),
/// weighted with the dependency's position in the source's list.
pub(crate) struct GraphBuilder {
    graph: DiGraph<ModuleSlot, usize>,
    index: HashMap<ModuleVersionId, NodeIndex>,
}

impl GraphBuilder {
    pub(crate) fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn lookup(&self, id: &ModuleVersionId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub(crate) fn id(&self, idx: NodeIndex) -> &ModuleVersionId {
        &self.graph[idx].id
    }

    /// Add a node for `id`. The caller guarantees `id` has no node yet.
    pub(crate) fn add_module(&mut self, id: ModuleVersionId) -> NodeIndex {
        let idx = self.graph.add_node(ModuleSlot {
            id: id.clone(),
            dependencies: Vec::new(),
            incoming: Vec::new(),
        });
        self.index.insert(id, idx);
        idx
    }

    /// Append `dependency` to `source` and, for a resolved edge, record
    /// `source` as a dependee of `target`.
    pub(crate) fn attach(
        &mut self,
        source: NodeIndex,
        dependency: DependencyResult,
        target: Option<NodeIndex>,
    ) {
        let edge = self.graph[source].dependencies.len();
        if let Some(target) = target {
            self.graph[target]
                .incoming
                .push(IncomingEdge { from: source, edge });
            self.graph.add_edge(source, target, edge);
        }
        self.graph[source].dependencies.push(dependency);
    }

    pub(crate) fn finish(self, root: NodeIndex) -> ResolutionResult {
        ResolutionResult {
            graph: self.graph,
            index: self.index,
            root,
        }
    }
}

/// The fully assembled, immutable module graph.
///
/// Every module version reachable from the root appears exactly once. Nodes
/// are stored in discovery order (depth-first preorder from the root).
pub struct ResolutionResult {
    graph: DiGraph<ModuleSlot, usize>,
    index: HashMap<ModuleVersionId, NodeIndex>,
    root: NodeIndex,
}

impl ResolutionResult {
    fn view(&self, idx: NodeIndex) -> ModuleVersionResult<'_> {
        ModuleVersionResult { result: self, idx }
    }

    pub fn root(&self) -> ModuleVersionResult<'_> {
        self.view(self.root)
    }

    /// All modules in the graph, root first.
    pub fn all_module_versions(&self) -> impl Iterator<Item = ModuleVersionResult<'_>> + '_ {
        self.graph.node_indices().map(move |idx| self.view(idx))
    }

    /// Every dependency edge in the graph with the module that declared it.
    pub fn all_dependencies(
        &self,
    ) -> impl Iterator<Item = (ModuleVersionResult<'_>, &DependencyResult)> + '_ {
        self.all_module_versions()
            .flat_map(|module| module.dependencies().iter().map(move |dep| (module, dep)))
    }

    /// Dependency edges whose resolution failed.
    pub fn unresolved_dependencies(
        &self,
    ) -> impl Iterator<Item = (ModuleVersionResult<'_>, &DependencyResult)> + '_ {
        self.all_dependencies().filter(|(_, dep)| !dep.is_resolved())
    }

    pub fn find(&self, id: &ModuleVersionId) -> Option<ModuleVersionResult<'_>> {
        self.index.get(id).map(|&idx| self.view(idx))
    }

    /// Resolve a user-provided key to a module.
    ///
    /// Tries an exact `group:name:version` first, then `group:name`, then
    /// the bare module name. The first match in discovery order wins.
    pub fn find_by_key(&self, key: &str) -> Option<ModuleVersionResult<'_>> {
        if let Some(found) = ModuleVersionId::parse(key).and_then(|id| self.find(&id)) {
            return Some(found);
        }
        self.all_module_versions()
            .find(|m| m.id().key() == key)
            .or_else(|| self.all_module_versions().find(|m| m.id().name == key))
    }

    /// Groups of modules that depend on each other in a cycle.
    ///
    /// Members of a group and the groups themselves are in discovery order.
    pub fn cycles(&self) -> Vec<Vec<ModuleVersionResult<'_>>> {
        let mut groups: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || scc.iter().any(|&idx| self.graph.contains_edge(idx, idx))
            })
            .collect();
        for group in &mut groups {
            group.sort();
        }
        groups.sort();
        groups
            .into_iter()
            .map(|group| group.into_iter().map(|idx| self.view(idx)).collect())
            .collect()
    }

    /// Number of modules, including the root.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Always false: the root is part of every result.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of dependency edges, resolved and unresolved.
    pub fn dependency_count(&self) -> usize {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].dependencies.len())
            .sum()
    }

    /// Render the dependency tree from the root.
    ///
    /// Each module's dependencies are listed once, under its first
    /// occurrence. Later occurrences of a module with dependencies are marked
    /// `(*)` and not expanded again.
    pub fn print_tree(&self, max_depth: Option<usize>, show_unresolved: bool) -> String {
        let mut output = String::new();
        let root = self.root();
        output.push_str(&format!("{}\n", root.id()));

        let mut expanded = HashSet::from([self.root]);
        let mut stack = vec![TreeFrame {
            children: visible_dependencies(root, show_unresolved),
            cursor: 0,
            prefix: String::new(),
            depth: 1,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&dep) = frame.children.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            let is_last = frame.cursor == frame.children.len();
            let connector = if is_last { "└── " } else { "├── " };

            let target = dep.selected().and_then(|id| self.find(id));
            let children = target
                .map(|t| visible_dependencies(t, show_unresolved))
                .unwrap_or_default();
            let repeated =
                target.is_some_and(|t| !children.is_empty() && expanded.contains(&t.idx));
            let marker = if repeated { " (*)" } else { "" };
            output.push_str(&format!("{}{connector}{dep}{marker}\n", frame.prefix));

            let Some(target) = target else { continue };
            let at_limit = max_depth.is_some_and(|max| frame.depth >= max);
            if repeated || children.is_empty() || at_limit {
                continue;
            }
            expanded.insert(target.idx);
            let prefix = format!("{}{}", frame.prefix, if is_last { "    " } else { "│   " });
            let depth = frame.depth + 1;
            stack.push(TreeFrame {
                children,
                cursor: 0,
                prefix,
                depth,
            });
        }
        output
    }

    /// Find a path of modules from the root to the module matching `key`.
    pub fn find_path(&self, key: &str) -> Option<Vec<ModuleVersionResult<'_>>> {
        let target = self.find_by_key(key)?;
        let root = self.root();
        if root == target {
            return Some(vec![root]);
        }

        let mut visited = HashSet::from([self.root]);
        let mut stack = vec![PathFrame {
            module: root,
            children: root.selected_dependencies(),
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            if child == target {
                let mut path: Vec<_> = stack.iter().map(|f| f.module).collect();
                path.push(child);
                return Some(path);
            }
            if visited.insert(child.idx) {
                stack.push(PathFrame {
                    module: child,
                    children: child.selected_dependencies(),
                    cursor: 0,
                });
            }
        }
        None
    }

    /// Render the dependees of the module matching `key`, recursively.
    ///
    /// Like [`ResolutionResult::print_tree`], a module's dependees are listed
    /// once; later occurrences are marked `(*)`.
    pub fn print_inverted_tree(&self, key: &str) -> String {
        let mut output = String::new();
        let Some(module) = self.find_by_key(key) else {
            return output;
        };
        output.push_str(&format!("{}\n", module.id()));

        let mut expanded = HashSet::from([module.idx]);
        let mut stack = vec![TreeFrame {
            children: module.dependees(),
            cursor: 0,
            prefix: String::new(),
            depth: 1,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&dependee) = frame.children.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            let is_last = frame.cursor == frame.children.len();
            let connector = if is_last { "└── " } else { "├── " };

            let children = dependee.dependees();
            let repeated = !children.is_empty() && expanded.contains(&dependee.idx);
            let marker = if repeated { " (*)" } else { "" };
            output.push_str(&format!("{}{connector}{dependee}{marker}\n", frame.prefix));

            if repeated || children.is_empty() {
                continue;
            }
            expanded.insert(dependee.idx);
            let prefix = format!("{}{}", frame.prefix, if is_last { "    " } else { "│   " });
            let depth = frame.depth + 1;
            stack.push(TreeFrame {
                children,
                cursor: 0,
                prefix,
                depth,
            });
        }
        output
    }
}

/// Pending children of one rendered tree line.
struct TreeFrame<T> {
    children: Vec<T>,
    cursor: usize,
    prefix: String,
    depth: usize,
}

fn visible_dependencies(
    module: ModuleVersionResult<'_>,
    show_unresolved: bool,
) -> Vec<&DependencyResult> {
    module
        .dependencies()
        .iter()
        .filter(|dep| show_unresolved || dep.is_resolved())
        .collect()
}

/// A module on the current search path and the children still to try.
struct PathFrame<'a> {
    module: ModuleVersionResult<'a>,
    children: Vec<ModuleVersionResult<'a>>,
    cursor: usize,
}

impl fmt::Debug for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionResult")
            .field("root", self.root().id())
            .field("modules", &self.len())
            .field("dependencies", &self.dependency_count())
            .finish()
    }
}

/// A module version in a [`ResolutionResult`].
///
/// Views compare by node identity: two views are equal only if they refer to
/// the same node of the same result.
#[derive(Clone, Copy)]
pub struct ModuleVersionResult<'a> {
    result: &'a ResolutionResult,
    idx: NodeIndex,
}

impl<'a> ModuleVersionResult<'a> {
    fn slot(&self) -> &'a ModuleSlot {
        &self.result.graph[self.idx]
    }

    pub fn id(&self) -> &'a ModuleVersionId {
        &self.slot().id
    }

    /// Position of this module in discovery order (the root is 0).
    pub fn index(&self) -> usize {
        self.idx.index()
    }

    /// Outgoing edges in the order they were first recorded.
    pub fn dependencies(&self) -> &'a [DependencyResult] {
        &self.slot().dependencies
    }

    /// The module selected by each resolved dependency, in edge order.
    pub fn selected_dependencies(&self) -> Vec<ModuleVersionResult<'a>> {
        let result = self.result;
        self.dependencies()
            .iter()
            .filter_map(|dep| dep.selected())
            .filter_map(|id| result.find(id))
            .collect()
    }

    /// Distinct modules that selected this one, in the order they were recorded.
    pub fn dependees(&self) -> Vec<ModuleVersionResult<'a>> {
        let mut seen = HashSet::new();
        self.slot()
            .incoming
            .iter()
            .filter(|incoming| seen.insert(incoming.from))
            .map(|incoming| self.result.view(incoming.from))
            .collect()
    }

    /// One entry per edge that selected this module.
    pub fn incoming(&self) -> impl Iterator<Item = DependeeEdge<'a>> + 'a {
        let result = self.result;
        self.slot().incoming.iter().map(move |incoming| {
            let from = result.view(incoming.from);
            DependeeEdge {
                from,
                dependency: &from.dependencies()[incoming.edge],
            }
        })
    }
}

impl PartialEq for ModuleVersionResult<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.result, other.result) && self.idx == other.idx
    }
}

impl Eq for ModuleVersionResult<'_> {}

impl Hash for ModuleVersionResult<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
    }
}

impl fmt::Debug for ModuleVersionResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleVersionResult({})", self.id())
    }
}

impl fmt::Display for ModuleVersionResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.id(), f)
    }
}

/// A dependee back-reference: the selecting module and the edge it used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependeeEdge<'a> {
    pub from: ModuleVersionResult<'a>,
    pub dependency: &'a DependencyResult,
}

#[cfg(test)]
mod tests {
    use modgraph_core::id::ModuleSelector;

    use crate::collector::EdgeCollector;

    use super::*;

    fn id(s: &str) -> ModuleVersionId {
        ModuleVersionId::parse(s).unwrap()
    }

    fn dep(s: &str) -> DependencyResult {
        DependencyResult::to(id(s))
    }

    /// app -> a -> c, app -> b (failed), app -> d -> app
    fn sample() -> ResolutionResult {
        let mut c = EdgeCollector::new();
        c.start(id("com.example:app:1.0"));
        c.record(
            id("com.example:app:1.0"),
            [
                dep("org.a:a:1.0"),
                DependencyResult::unresolved(
                    ModuleSelector::parse("org.b:b:2.0").unwrap(),
                    "not found",
                ),
                dep("org.d:d:1.0"),
            ],
        );
        c.record(id("org.a:a:1.0"), [dep("org.c:c:3.0")]);
        c.record(id("org.c:c:3.0"), []);
        c.record(id("org.d:d:1.0"), [dep("com.example:app:1.0")]);
        c.result().unwrap()
    }

    #[test]
    fn tree_printing() {
        let tree = sample().print_tree(None, true);
        let expected = "\
com.example:app:1.0
├── org.a:a:1.0
│   └── org.c:c:3.0
├── org.b:b:2.0 FAILED (not found)
└── org.d:d:1.0
    └── com.example:app:1.0 (*)
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn tree_hides_unresolved_and_respects_depth() {
        let tree = sample().print_tree(Some(1), false);
        assert!(!tree.contains("FAILED"));
        assert!(tree.contains("org.a:a:1.0"));
        assert!(!tree.contains("org.c:c:3.0"));
    }

    #[test]
    fn find_path_exists() {
        let result = sample();
        let path = result.find_path("org.c:c").unwrap();
        let ids: Vec<String> = path.iter().map(|m| m.id().to_string()).collect();
        assert_eq!(ids, ["com.example:app:1.0", "org.a:a:1.0", "org.c:c:3.0"]);
    }

    #[test]
    fn find_path_not_found() {
        assert!(sample().find_path("org.missing:lib").is_none());
    }

    #[test]
    fn find_by_key_forms() {
        let result = sample();
        assert_eq!(result.find_by_key("org.c:c:3.0").unwrap().id(), &id("org.c:c:3.0"));
        assert_eq!(result.find_by_key("org.c:c").unwrap().id(), &id("org.c:c:3.0"));
        assert_eq!(result.find_by_key("c").unwrap().id(), &id("org.c:c:3.0"));
        assert!(result.find_by_key("org.c:c:9.9").is_none());
    }

    #[test]
    fn inverted_tree_partial_key() {
        let inv = sample().print_inverted_tree("c");
        let expected = "\
org.c:c:3.0
└── org.a:a:1.0
    └── com.example:app:1.0
        └── org.d:d:1.0
            └── com.example:app:1.0 (*)
";
        assert_eq!(inv, expected);
    }

    #[test]
    fn cycles_are_grouped() {
        let result = sample();
        let cycles = result.cycles();
        assert_eq!(cycles.len(), 1);
        let ids: Vec<String> = cycles[0].iter().map(|m| m.id().to_string()).collect();
        assert_eq!(ids, ["com.example:app:1.0", "org.d:d:1.0"]);
    }

    #[test]
    fn unresolved_dependencies_listed_with_source() {
        let result = sample();
        let failed: Vec<_> = result.unresolved_dependencies().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, result.root());
        assert_eq!(failed[0].1.requested().name, "b");
        assert_eq!(result.dependency_count(), 5);
    }

    /// Two modules per layer, each depending on both modules of the next layer.
    fn ladder(layers: usize) -> ResolutionResult {
        let node = |layer: usize, side: &str| id(&format!("g:l{layer}{side}:1"));
        let mut c = EdgeCollector::new();
        c.start(id("g:top:1"));
        c.record(id("g:top:1"), [DependencyResult::to(node(0, "a"))]);
        for layer in 0..layers {
            let next = [node(layer + 1, "a"), node(layer + 1, "b")];
            for side in ["a", "b"] {
                c.record(node(layer, side), next.clone().map(DependencyResult::to));
            }
        }
        c.record(node(layers, "a"), []);
        c.record(node(layers, "b"), []);
        c.result().unwrap()
    }

    #[test]
    fn shared_subtrees_are_expanded_once() {
        let result = ladder(20);
        let tree = result.print_tree(None, true);
        assert_eq!(tree.lines().count(), 1 + result.dependency_count());
        assert!(tree.contains("g:l2a:1 (*)"));
    }

    #[test]
    fn shared_dependees_are_expanded_once() {
        let result = ladder(20);
        let inv = result.print_inverted_tree("g:l20a:1");
        let incoming: usize = result
            .all_module_versions()
            .map(|m| m.dependees().len())
            .sum();
        assert!(inv.lines().count() <= 1 + incoming, "got {} lines", inv.lines().count());
        assert!(inv.contains("(*)"));
        assert!(inv.contains("g:top:1"));
    }

    /// Run `f` on a thread whose stack is far too small for one frame per module.
    fn on_small_stack(f: impl FnOnce() + Send + 'static) {
        std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn deep_chain_renders_without_recursion() {
        on_small_stack(|| {
            let depth = 3_000;
            let mut c = EdgeCollector::new();
            c.start(id("g:m0:1"));
            for i in 0..depth - 1 {
                c.record(id(&format!("g:m{i}:1")), [dep(&format!("g:m{}:1", i + 1))]);
            }
            c.record(id(&format!("g:m{}:1", depth - 1)), []);
            let result = c.result().unwrap();

            let tree = result.print_tree(None, true);
            assert_eq!(tree.lines().count(), depth);

            let last = format!("g:m{}:1", depth - 1);
            let path = result.find_path(&last).unwrap();
            assert_eq!(path.len(), depth);
            assert_eq!(path[depth - 1].id().to_string(), last);

            let inv = result.print_inverted_tree(&last);
            assert_eq!(inv.lines().count(), depth);
            assert!(inv.ends_with("└── g:m0:1\n"));
        });
    }
}
