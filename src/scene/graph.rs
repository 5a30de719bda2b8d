use slotmap::SlotMap;

use crate::host::NodeTransforms;

use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform::Transform;

/// Flat node storage with parent/child links.
///
/// Handles are generational: once a subtree is removed, every handle into it
/// resolves to `None`, so a stale asset root can never be written through.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeHandle, Node>,
    root_nodes: Vec<NodeHandle>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a detached node and registers it as a scene root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.add_node(node);
        self.attach(handle, parent);
        handle
    }

    /// Re-parents `child` under `parent`, detaching it from its previous parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Removes `root` and all of its descendants. Returns the number of nodes removed.
    pub fn remove_subtree(&mut self, root: NodeHandle) -> usize {
        let Some(parent) = self.nodes.get(root).map(|n| n.parent) else {
            return 0;
        };

        match parent {
            Some(p) => {
                if let Some(n) = self.nodes.get_mut(p) {
                    n.children.retain(|&c| c != root);
                }
            }
            None => self.root_nodes.retain(|&r| r != root),
        }

        let mut removed = 0;
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.remove(handle) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    pub fn transform_mut(&mut self, handle: NodeHandle) -> Option<&mut Transform> {
        self.nodes.get_mut(handle).map(|n| &mut n.transform)
    }

    /// Depth-first search for a node named `name` in the subtree rooted at `root`.
    #[must_use]
    pub fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    #[must_use]
    pub fn root_nodes(&self) -> &[NodeHandle] {
        &self.root_nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl NodeTransforms for SceneGraph {
    fn transform_mut(&mut self, node: NodeHandle) -> Option<&mut Transform> {
        SceneGraph::transform_mut(self, node)
    }

    fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        SceneGraph::find_by_name(self, root, name)
    }

    fn remove_subtree(&mut self, root: NodeHandle) -> usize {
        SceneGraph::remove_subtree(self, root)
    }
}
