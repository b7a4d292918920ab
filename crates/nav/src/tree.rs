//! Depth-first traversal of the navigation tree.
//!
//! Nodes are addressed by their group index plus the index of each link on
//! the way down, which keeps addresses stable for an immutable tree and
//! cheap to compare.

use std::fmt;

use kdocs_types::{LinkNode, NavigationGroup};
use serde::Serialize;

/// Position of a node inside the tree: group index, then one link index per
/// level starting with the top-level link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeAddress {
    pub group_index: usize,
    pub indices: Vec<usize>,
}

impl NodeAddress {
    pub fn new(group_index: usize, indices: Vec<usize>) -> Self {
        Self { group_index, indices }
    }

    /// One for top-level links, two for their children and so on.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self::new(self.group_index, indices)
    }

    /// Whether `self` is `other` or one of its ancestors.
    pub fn contains(&self, other: &NodeAddress) -> bool {
        self.group_index == other.group_index && other.indices.starts_with(&self.indices)
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.group_index)?;
        for index in &self.indices {
            write!(f, ".{index}")?;
        }
        Ok(())
    }
}

/// Concatenates an ancestor prefix and a relative href.
///
/// No separators are inserted or collapsed.
pub fn join_href(prefix: &str, href: &str) -> String {
    let mut path = String::with_capacity(prefix.len() + href.len());
    path.push_str(prefix);
    path.push_str(href);
    path
}

/// A node visited by [`walk`], with its absolute path already computed.
#[derive(Debug, Clone)]
pub struct TreeEntry<'a> {
    pub address: NodeAddress,
    pub path: String,
    pub node: &'a LinkNode,
}

impl TreeEntry<'_> {
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }
}

/// Visits every link of every group in pre-order (parents before children,
/// siblings in declaration order).
pub fn walk(tree: &[NavigationGroup]) -> Vec<TreeEntry<'_>> {
    let mut entries = Vec::new();
    for (group_index, group) in tree.iter().enumerate() {
        for (link_index, link) in group.links.iter().enumerate() {
            walk_node(link, NodeAddress::new(group_index, vec![link_index]), "", &mut entries);
        }
    }
    entries
}

fn walk_node<'a>(node: &'a LinkNode, address: NodeAddress, prefix: &str, entries: &mut Vec<TreeEntry<'a>>) {
    let path = join_href(prefix, &node.href);
    entries.push(TreeEntry {
        address: address.clone(),
        path: path.clone(),
        node,
    });
    for (index, child) in node.children.iter().enumerate() {
        walk_node(child, address.child(index), &path, entries);
    }
}

/// Absolute paths of every leaf, in traversal order.
pub fn leaf_paths(tree: &[NavigationGroup]) -> Vec<String> {
    walk(tree).into_iter().filter(TreeEntry::is_leaf).map(|entry| entry.path).collect()
}

/// Looks up a node by address.
pub fn node_at<'a>(tree: &'a [NavigationGroup], address: &NodeAddress) -> Option<&'a LinkNode> {
    let group = tree.get(address.group_index)?;
    let (first, rest) = address.indices.split_first()?;
    let mut node = group.links.get(*first)?;
    for index in rest {
        node = node.children.get(*index)?;
    }
    Some(node)
}

/// Absolute path of the node at `address`.
pub fn absolute_path(tree: &[NavigationGroup], address: &NodeAddress) -> Option<String> {
    let group = tree.get(address.group_index)?;
    let mut links = group.links.as_slice();
    let mut path = String::new();
    for index in &address.indices {
        let node = links.get(*index)?;
        path.push_str(&node.href);
        links = node.children.as_slice();
    }
    Some(path)
}
