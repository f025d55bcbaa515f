use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl Default for NodeId {
    fn default() -> Self {
        NodeId(0)
    }
}

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DirStats {
    pub bytes: u64,
    pub files: u64,
    pub dirs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirNode {
    pub id: NodeId,
    /// Navigational link only; the parent owns this node through `subdirs`.
    pub parent: Option<NodeId>,
    pub name: String,
    pub subdirs: Vec<NodeId>,
    pub files: Vec<FileEntry>,
}

/// Arena of directories. The first directory pushed is the root, every other
/// node is reachable from it through `subdirs`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Tree {
    nodes: Vec<DirNode>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().map(|n| n.id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&DirNode> {
        self.nodes.get(id.index())
    }

    /// Panics if `id` was not handed out by this tree.
    pub fn node(&self, id: NodeId) -> &DirNode {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut DirNode {
        &mut self.nodes[id.index()]
    }

    fn push(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(DirNode {
            id,
            parent,
            name: name.to_string(),
            subdirs: Vec::new(),
            files: Vec::new(),
        });
        id
    }

    /// Returns the existing root if there is one.
    pub fn create_root(&mut self, name: &str) -> NodeId {
        match self.root() {
            Some(root) => root,
            None => self.push(None, name),
        }
    }

    /// Creates a subdirectory under `parent` without checking for an existing
    /// sibling of the same name.
    pub fn attach_dir(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.push(Some(parent), name);
        self.node_mut(parent).subdirs.push(id);
        id
    }

    pub fn add_file(&mut self, dir: NodeId, name: &str, size: u64) {
        self.node_mut(dir).files.push(FileEntry {
            name: name.to_string(),
            size,
        });
    }

    pub fn parent(&self, dir: NodeId) -> Option<NodeId> {
        self.node(dir).parent
    }

    pub fn has_subdirectory(&self, dir: NodeId, name: &str) -> bool {
        self.node(dir)
            .subdirs
            .iter()
            .any(|&c| self.node(c).name == name)
    }

    /// First subdirectory of `dir` called `name`.
    pub fn subdirectory_named(&self, dir: NodeId, name: &str) -> Result<NodeId, NavigationError> {
        self.node(dir)
            .subdirs
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
            .ok_or_else(|| NavigationError::NotFound(name.to_string()))
    }

    /// Pre-order walk over `from` and all of its descendants.
    pub fn dirs_preorder(&self, from: NodeId) -> DirsPreorder<'_> {
        DirsPreorder {
            tree: self,
            stack: vec![from],
        }
    }

    /// Own file sizes plus the total of every subdirectory. Recomputed on each
    /// call; uses an explicit stack so depth is bounded only by memory.
    pub fn total_size(&self, dir: NodeId) -> u64 {
        self.dirs_preorder(dir)
            .flat_map(|d| self.node(d).files.iter())
            .fold(0u64, |acc, f| acc.saturating_add(f.size))
    }

    pub fn stats(&self, dir: NodeId) -> DirStats {
        let mut stats = DirStats::default();
        for d in self.dirs_preorder(dir) {
            let node = self.node(d);
            stats.dirs += node.subdirs.len() as u64;
            stats.files += node.files.len() as u64;
            for f in &node.files {
                stats.bytes = stats.bytes.saturating_add(f.size);
            }
        }
        stats
    }

    /// Slash separated path from the root, e.g. `/a/e`.
    pub fn path_of(&self, dir: NodeId) -> String {
        let mut names = Vec::new();
        let mut cur = Some(dir);
        while let Some(id) = cur {
            let node = self.node(id);
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            cur = node.parent;
        }
        if names.is_empty() {
            return self.node(dir).name.clone();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }
}

pub struct DirsPreorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for DirsPreorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // reversed so children come out in discovery order
        self.stack
            .extend(self.tree.node(id).subdirs.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.create_root("/");
        let a = tree.attach_dir(root, "a");
        let e = tree.attach_dir(a, "e");
        tree.add_file(root, "b.txt", 100);
        tree.add_file(a, "f", 20);
        tree.add_file(e, "i", 3);
        (tree, root, a, e)
    }

    #[test]
    fn total_size_sums_descendants() {
        let (tree, root, a, e) = sample();
        assert_eq!(tree.total_size(e), 3);
        assert_eq!(tree.total_size(a), 23);
        assert_eq!(tree.total_size(root), 123);
    }

    #[test]
    fn subdirectory_lookup() {
        let (tree, root, a, _) = sample();
        assert!(tree.has_subdirectory(root, "a"));
        assert!(!tree.has_subdirectory(root, "e"));
        assert_eq!(tree.subdirectory_named(root, "a"), Ok(a));
        assert_eq!(
            tree.subdirectory_named(root, "zzz"),
            Err(NavigationError::NotFound("zzz".into()))
        );
    }

    #[test]
    fn create_root_is_idempotent() {
        let mut tree = Tree::new();
        assert_eq!(tree.root(), None);
        let root = tree.create_root("/");
        assert_eq!(tree.create_root("other"), root);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn foreign_id_is_not_found() {
        let (tree, root, ..) = sample();
        assert_eq!(tree.get(root).map(|n| n.name.as_str()), Some("/"));
        assert!(tree.get(NodeId(99)).is_none());
        assert!(Tree::new().get(NodeId::default()).is_none());
    }

    #[test]
    fn preorder_visits_in_discovery_order() {
        let (mut tree, root, a, e) = sample();
        let d = tree.attach_dir(root, "d");
        let order: Vec<_> = tree.dirs_preorder(root).collect();
        assert_eq!(order, vec![root, a, e, d]);
    }

    #[test]
    fn parent_links_point_at_attaching_dir() {
        let (tree, root, a, e) = sample();
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(e), Some(a));
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let mut tree = Tree::new();
        let mut cur = tree.create_root("/");
        for i in 0..200_000 {
            cur = tree.attach_dir(cur, &format!("d{i}"));
        }
        tree.add_file(cur, "leaf", 7);
        let root = tree.root().unwrap();
        assert_eq!(tree.total_size(root), 7);
    }

    #[test]
    fn stats_and_paths() {
        let (tree, root, a, e) = sample();
        assert_eq!(
            tree.stats(root),
            DirStats {
                bytes: 123,
                files: 3,
                dirs: 2
            }
        );
        assert_eq!(tree.path_of(root), "/");
        assert_eq!(tree.path_of(a), "/a");
        assert_eq!(tree.path_of(e), "/a/e");
    }
}
