//! The layout inheritance forest.
//!
//! Every layout names at most one parent through its own `layout` property, so
//! the "extends" relation forms a forest: roots are layouts without a parent and
//! a child is any layout naming its parent. The forest is built on a petgraph
//! [`DiGraph`] with an edge from each layout to the parent it depends on, checked
//! for cycles with a colored depth-first search, and then read in the opposite
//! direction (parent → children) for rendering.
//!
//! Traversal state (the DFS colors) lives in a side table owned by the search,
//! never on the layout records themselves.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::suggest_layout;
use crate::core::{Files, LayoutError, LayoutResult};

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is on the current DFS path.
    Gray,
    /// Node and everything it depends on have been visited.
    Black,
}

/// The resolved inheritance structure of a layout collection.
#[derive(Debug, Clone)]
pub struct LayoutForest {
    /// Edges point from a layout to the parent it extends.
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    roots: Vec<String>,
}

impl LayoutForest {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            roots: Vec::new(),
        }
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            index
        } else {
            let index = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), index);
            index
        }
    }

    /// Layouts without a parent, sorted by name.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Direct children of `name`, sorted. Empty for unknown names.
    pub fn children(&self, name: &str) -> Vec<&str> {
        let Some(&index) = self.node_map.get(name) else {
            return Vec::new();
        };
        let mut children: Vec<&str> = self
            .graph
            .neighbors_directed(index, Direction::Incoming)
            .map(|child| self.graph[child].as_str())
            .collect();
        children.sort_unstable();
        children
    }

    /// The layout `name` extends, if any.
    pub fn parent(&self, name: &str) -> Option<&str> {
        let &index = self.node_map.get(name)?;
        self.graph.neighbors_directed(index, Direction::Outgoing).next().map(|p| self.graph[p].as_str())
    }

    /// Layouts grouped by depth: roots first, then their children, and so on.
    ///
    /// Every layout of a level depends only on layouts of earlier levels.
    pub fn levels(&self) -> Vec<Vec<String>> {
        let mut levels = Vec::new();
        let mut current = self.roots.clone();

        while !current.is_empty() {
            let mut next: Vec<String> = current
                .iter()
                .flat_map(|name| self.children(name))
                .map(str::to_string)
                .collect();
            next.sort_unstable();
            levels.push(current);
            current = next;
        }

        levels
    }

    /// Number of layouts.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the forest holds no layouts.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Render the forest as an indented tree.
    pub fn to_tree_string(&self) -> String {
        let mut result = String::new();
        for (i, root) in self.roots.iter().enumerate() {
            self.build_tree_string(root, &mut result, "", i == self.roots.len() - 1);
        }
        result
    }

    fn build_tree_string(&self, name: &str, result: &mut String, prefix: &str, is_last: bool) {
        let connector = if is_last {
            "└── "
        } else {
            "├── "
        };
        result.push_str(&format!("{prefix}{connector}{name}\n"));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        let children = self.children(name);
        for (i, child) in children.iter().enumerate() {
            self.build_tree_string(child, result, &child_prefix, i == children.len() - 1);
        }
    }

    /// Detect cycles using DFS with colors.
    fn detect_cycles(&self) -> LayoutResult<()> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|node| (node, Color::White)).collect();
        let mut path: Vec<NodeIndex> = Vec::new();

        for node in self.graph.node_indices() {
            if colors.get(&node) != Some(&Color::White) {
                continue;
            }
            if let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path) {
                let chain: Vec<&str> = cycle.iter().map(|&idx| self.graph[idx].as_str()).collect();
                return Err(LayoutError::CircularDependency {
                    layout: chain[0].to_string(),
                    chain: chain.join(" → "),
                });
            }
        }

        Ok(())
    }

    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for neighbor in self.graph.neighbors_directed(node, Direction::Outgoing) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    let start = path.iter().position(|&n| n == neighbor).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(neighbor);
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }
}

/// Build the inheritance forest of a layout collection.
///
/// Each layout's explicit `layout` property names its parent; the configured
/// default layout never applies here.
///
/// # Errors
///
/// - [`LayoutError::MissingLayout`] if a layout extends a name not in `layouts`
/// - [`LayoutError::CircularDependency`] if following parents ever revisits a layout
pub fn build_forest(layouts: &Files) -> LayoutResult<LayoutForest> {
    let mut forest = LayoutForest::new();

    for name in layouts.keys() {
        forest.ensure_node(name);
    }

    for (name, record) in layouts {
        let Some(parent) = record.layout_name() else {
            continue;
        };
        if !layouts.contains_key(parent) {
            return Err(LayoutError::MissingLayout {
                name: parent.to_string(),
                referenced_by: name.clone(),
                suggestion: suggest_layout(parent, layouts.keys()),
            });
        }
        let child = forest.ensure_node(name);
        let parent = forest.ensure_node(parent);
        forest.graph.add_edge(child, parent, ());
    }

    forest.detect_cycles()?;

    let with_parent: HashSet<&str> =
        layouts.iter().filter(|(_, record)| record.layout_name().is_some()).map(|(name, _)| name.as_str()).collect();
    forest.roots = layouts.keys().filter(|name| !with_parent.contains(name.as_str())).cloned().collect();

    debug!("Layout forest: {} layouts, {} roots", forest.len(), forest.roots.len());
    Ok(forest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileRecord;

    fn layouts(entries: &[(&str, Option<&str>)]) -> Files {
        entries
            .iter()
            .map(|(name, parent)| {
                let record = FileRecord::new(format!("<{name}>{{{{ contents }}}}"));
                let record = match parent {
                    Some(parent) => record.with_layout(*parent),
                    None => record,
                };
                ((*name).to_string(), record)
            })
            .collect()
    }

    #[test]
    fn test_grandparent_chain_levels() {
        let forest = build_forest(&layouts(&[
            ("grandparent.html", None),
            ("parent.html", Some("grandparent.html")),
            ("child.html", Some("parent.html")),
        ]))
        .unwrap();

        assert_eq!(forest.roots(), ["grandparent.html"]);
        assert_eq!(forest.children("grandparent.html"), ["parent.html"]);
        assert_eq!(forest.parent("child.html"), Some("parent.html"));
        assert_eq!(
            forest.levels(),
            vec![
                vec!["grandparent.html".to_string()],
                vec!["parent.html".to_string()],
                vec!["child.html".to_string()],
            ]
        );
    }

    #[test]
    fn test_multiple_roots_and_siblings() {
        let forest = build_forest(&layouts(&[
            ("a.html", None),
            ("b.html", None),
            ("post.html", Some("a.html")),
            ("page.html", Some("a.html")),
        ]))
        .unwrap();

        assert_eq!(forest.roots(), ["a.html", "b.html"]);
        assert_eq!(forest.children("a.html"), ["page.html", "post.html"]);
        assert!(forest.children("b.html").is_empty());
        assert_eq!(forest.len(), 4);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let err = build_forest(&layouts(&[("loop.html", Some("loop.html"))])).unwrap_err();
        assert_eq!(
            err,
            LayoutError::CircularDependency {
                layout: "loop.html".to_string(),
                chain: "loop.html → loop.html".to_string(),
            }
        );
    }

    #[test]
    fn test_mutual_reference_is_a_cycle() {
        let err = build_forest(&layouts(&[("a.html", Some("b.html")), ("b.html", Some("a.html"))])).unwrap_err();
        match err {
            LayoutError::CircularDependency {
                layout,
                chain,
            } => {
                assert_eq!(layout, "a.html");
                assert_eq!(chain, "a.html → b.html → a.html");
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_below_a_valid_root_is_detected() {
        let err = build_forest(&layouts(&[
            ("base.html", None),
            ("x.html", Some("y.html")),
            ("y.html", Some("z.html")),
            ("z.html", Some("x.html")),
        ]))
        .unwrap_err();
        assert!(matches!(err, LayoutError::CircularDependency { .. }));
    }

    #[test]
    fn test_missing_parent_suggests_close_name() {
        let err = build_forest(&layouts(&[("base.html", None), ("post.html", Some("bse.html"))])).unwrap_err();
        assert_eq!(
            err,
            LayoutError::MissingLayout {
                name: "bse.html".to_string(),
                referenced_by: "post.html".to_string(),
                suggestion: Some("base.html".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_collection() {
        let forest = build_forest(&Files::new()).unwrap();
        assert!(forest.is_empty());
        assert!(forest.levels().is_empty());
        assert_eq!(forest.to_tree_string(), "");
    }

    #[test]
    fn test_tree_string() {
        let forest = build_forest(&layouts(&[
            ("base.html", None),
            ("page.html", Some("base.html")),
            ("post.html", Some("base.html")),
        ]))
        .unwrap();
        assert_eq!(forest.to_tree_string(), "└── base.html\n    ├── page.html\n    └── post.html\n");
    }
}
