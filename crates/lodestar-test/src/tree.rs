//! In-memory UI tree implementing the focus and live-region host traits.

use lodestar_core::{FocusHost, LiveRegionHost, Politeness};

/// Handle of a node in a [`MockTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    focusable: bool,
    attached: bool,
    live: Option<(String, Politeness)>,
}

/// A tree of named nodes, some focusable, plus a single focus pointer.
///
/// Nodes are never freed: detaching marks a subtree as gone so stale handles
/// stay comparable. Live-region nodes hang off the root.
#[derive(Debug, Clone)]
pub struct MockTree {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
    focus_log: Vec<NodeId>,
}

impl Default for MockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTree {
    /// Tree with just a root node named `"root"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "root".to_string(),
                parent: None,
                children: Vec::new(),
                focusable: false,
                attached: true,
                live: None,
            }],
            focused: None,
            focus_log: Vec::new(),
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, parent: NodeId, name: &str, focusable: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let attached = self.is_attached(&parent);
        self.nodes.push(Node {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            focusable,
            attached,
            live: None,
        });
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    /// Add a non-focusable grouping node.
    pub fn container(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push(parent, name, false)
    }

    /// Add a focusable leaf.
    pub fn focusable(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push(parent, name, true)
    }

    /// Add several focusable leaves at once.
    pub fn focusables(&mut self, parent: NodeId, names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|name| self.focusable(parent, name)).collect()
    }

    /// Remove `id` and its subtree from the tree.
    ///
    /// Focus held inside the subtree is dropped.
    pub fn detach(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = &mut self.nodes[current.0 as usize];
            node.attached = false;
            pending.extend(node.children.iter().copied());
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
    }

    /// Name given at creation.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0 as usize].name
    }

    /// Parent of `id`, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0 as usize].parent
    }

    /// First attached node with `name`, in document order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.document_order(self.root())
            .into_iter()
            .find(|id| self.name(*id) == name)
    }

    /// Currently focused node's name.
    #[must_use]
    pub fn focused_name(&self) -> Option<&str> {
        self.focused.map(|id| self.name(id))
    }

    /// Every node passed to [`FocusHost::focus`], oldest first.
    #[must_use]
    pub fn focus_log(&self) -> &[NodeId] {
        &self.focus_log
    }

    /// Focus a node without going through the host trait's bookkeeping.
    pub fn set_focus(&mut self, id: Option<NodeId>) {
        self.focused = id;
    }

    /// Attached focusable nodes of the whole tree, in document order.
    #[must_use]
    pub fn tab_order(&self) -> Vec<NodeId> {
        self.focusable_within(&self.root())
    }

    /// Messages of live-region nodes still in the tree.
    #[must_use]
    pub fn live_messages(&self) -> Vec<(&str, Politeness)> {
        self.nodes
            .iter()
            .filter(|n| n.attached)
            .filter_map(|n| n.live.as_ref().map(|(m, p)| (m.as_str(), *p)))
            .collect()
    }

    /// Pre-order walk of attached descendants of `from`, excluding `from`.
    fn document_order(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[from.0 as usize]
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0 as usize];
            if !node.attached {
                continue;
            }
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }
}

impl FocusHost for MockTree {
    type Element = NodeId;

    fn focusable_within(&self, container: &NodeId) -> Vec<NodeId> {
        self.document_order(*container)
            .into_iter()
            .filter(|id| self.nodes[id.0 as usize].focusable)
            .collect()
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn focus(&mut self, element: &NodeId) {
        self.focus_log.push(*element);
        if self.is_attached(element) {
            self.focused = Some(*element);
        }
    }

    fn is_attached(&self, element: &NodeId) -> bool {
        self.nodes
            .get(element.0 as usize)
            .is_some_and(|n| n.attached)
    }
}

impl LiveRegionHost for MockTree {
    type Node = NodeId;

    fn create_live_node(&mut self, message: &str, politeness: Politeness) -> NodeId {
        let root = self.root();
        let id = self.push(root, "live-region", false);
        self.nodes[id.0 as usize].live = Some((message.to_string(), politeness));
        id
    }

    fn remove_node(&mut self, node: &NodeId) {
        self.detach(*node);
    }
}
