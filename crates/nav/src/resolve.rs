//! # Active-path resolution
//!
//! Given the current page path, finds the group and the chain of links that
//! the sidebar should treat as active.
//!
//! ## Matching rules
//!
//! - Top-level links match only when their `href` equals the path exactly.
//! - Nested links match when `prefix + href` equals the path **or** is a
//!   substring of it. The containment rule keeps a parent open for anchors
//!   and sub-routes that are not leaves of their own. It is deliberately
//!   loose: `/contracts` also matches inside `/contracts-legacy`, and pages
//!   rely on that partial-prefix expansion.
//! - A nested link that does not match is still searched for matching
//!   descendants under the extended prefix.
//!
//! Groups and links are scanned in declaration order and the first match
//! wins. Authoring order therefore doubles as priority order; nothing tries
//! to pick a longer or better match.

use kdocs_types::{LinkNode, NavigationGroup};
use serde::Serialize;
use tracing::debug;

use crate::tree::{NodeAddress, join_href};

/// How a step of the active chain was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// `prefix + href` equals the current path.
    Exact,
    /// The current path contains `prefix + href`.
    Contains,
    /// The node did not match itself; one of its descendants did.
    Ancestor,
}

impl MatchKind {
    /// Whether the node's own row should render as active.
    pub fn is_self_match(self) -> bool {
        matches!(self, MatchKind::Exact | MatchKind::Contains)
    }
}

/// One node of the active chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainStep {
    /// Index of the node among its siblings.
    pub link_index: usize,
    /// Concatenated hrefs of every ancestor (empty for top-level links).
    pub ancestor_prefix: String,
    /// Absolute path of the node (`ancestor_prefix + href`).
    pub path: String,
    pub kind: MatchKind,
}

impl ChainStep {
    fn new(link_index: usize, ancestor_prefix: &str, href: &str, kind: MatchKind) -> Self {
        Self {
            link_index,
            ancestor_prefix: ancestor_prefix.to_string(),
            path: join_href(ancestor_prefix, href),
            kind,
        }
    }
}

/// Ordered path from the active group's top-level link down to the deepest
/// matching node. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveChain {
    group_index: usize,
    steps: Vec<ChainStep>,
}

impl ActiveChain {
    pub fn group_index(&self) -> usize {
        self.group_index
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Index of the matched top-level link inside its group.
    pub fn top_level_index(&self) -> usize {
        self.steps[0].link_index
    }

    /// Deepest node of the chain.
    pub fn leaf(&self) -> &ChainStep {
        // steps is non-empty by construction
        &self.steps[self.steps.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when the top-level link was not itself an exact match, i.e. the
    /// active page lives somewhere below it.
    pub fn is_from_children(&self) -> bool {
        self.steps[0].kind != MatchKind::Exact
    }

    /// `(group_index, link_index, ancestor_prefix)` per step, root first.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, &str)> + '_ {
        self.steps
            .iter()
            .map(|step| (self.group_index, step.link_index, step.ancestor_prefix.as_str()))
    }

    /// Address of every node on the chain, root first.
    pub fn addresses(&self) -> Vec<NodeAddress> {
        let mut indices = Vec::with_capacity(self.steps.len());
        self.steps
            .iter()
            .map(|step| {
                indices.push(step.link_index);
                NodeAddress::new(self.group_index, indices.clone())
            })
            .collect()
    }

    /// Address of the deepest node.
    pub fn leaf_address(&self) -> NodeAddress {
        NodeAddress::new(self.group_index, self.steps.iter().map(|step| step.link_index).collect())
    }

    /// Whether the chain goes through (or ends at) the node at `address`.
    pub fn passes_through(&self, address: &NodeAddress) -> bool {
        address.group_index == self.group_index
            && address.indices.len() <= self.steps.len()
            && address
                .indices
                .iter()
                .zip(&self.steps)
                .all(|(index, step)| *index == step.link_index)
    }

    /// Resolves the chain back to tree nodes. Returns `None` if the chain was
    /// computed against a different tree.
    pub fn nodes<'a>(&self, tree: &'a [NavigationGroup]) -> Option<Vec<&'a LinkNode>> {
        let group = tree.get(self.group_index)?;
        let mut siblings = group.links.as_slice();
        let mut nodes = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let node = siblings.get(step.link_index)?;
            nodes.push(node);
            siblings = node.children.as_slice();
        }
        Some(nodes)
    }
}

/// Finds the active chain for `current_path`, or `None` when no link or
/// descendant matches (unmapped routes, 404 pages).
pub fn resolve_active_chain(tree: &[NavigationGroup], current_path: &str) -> Option<ActiveChain> {
    for (group_index, group) in tree.iter().enumerate() {
        if let Some(steps) = resolve_in_group(group, current_path) {
            let chain = ActiveChain { group_index, steps };
            debug!(
                path = current_path,
                group = %group.title,
                depth = chain.len(),
                leaf = %chain.leaf().path,
                "resolved active chain"
            );
            return Some(chain);
        }
    }
    debug!(path = current_path, "no navigation entry matches path");
    None
}

/// Index of the first group that contains a match for `current_path`.
pub fn active_group_index(tree: &[NavigationGroup], current_path: &str) -> Option<usize> {
    resolve_active_chain(tree, current_path).map(|chain| chain.group_index())
}

/// Whether `group` holds the active page for `current_path`.
pub fn is_active_group(group: &NavigationGroup, current_path: &str) -> bool {
    resolve_in_group(group, current_path).is_some()
}

/// Whether any of `children` (or their descendants) matches `current_path`
/// under `parent_prefix`, using the nested matching rules.
pub fn has_active_descendant(children: &[LinkNode], parent_prefix: &str, current_path: &str) -> bool {
    let mut steps = Vec::new();
    find_in_children(children, parent_prefix, current_path, &mut steps)
}

/// Nested-level rule for a single node: exact or containment match.
pub fn is_nested_match(candidate_path: &str, current_path: &str) -> Option<MatchKind> {
    if candidate_path == current_path {
        Some(MatchKind::Exact)
    } else if current_path.contains(candidate_path) {
        Some(MatchKind::Contains)
    } else {
        None
    }
}

fn resolve_in_group(group: &NavigationGroup, current_path: &str) -> Option<Vec<ChainStep>> {
    for (link_index, link) in group.links.iter().enumerate() {
        if link.href == current_path {
            let mut steps = vec![ChainStep::new(link_index, "", &link.href, MatchKind::Exact)];
            find_in_children(&link.children, &link.href, current_path, &mut steps);
            return Some(steps);
        }
        if link.is_leaf() {
            continue;
        }
        let mut steps = vec![ChainStep::new(link_index, "", &link.href, MatchKind::Ancestor)];
        if find_in_children(&link.children, &link.href, current_path, &mut steps) {
            return Some(steps);
        }
    }
    None
}

/// Appends the first matching child (and its own deepest match) to `steps`.
/// Leaves `steps` untouched when nothing matches.
fn find_in_children(children: &[LinkNode], prefix: &str, current_path: &str, steps: &mut Vec<ChainStep>) -> bool {
    for (index, child) in children.iter().enumerate() {
        let candidate = join_href(prefix, &child.href);
        if let Some(kind) = is_nested_match(&candidate, current_path) {
            steps.push(ChainStep::new(index, prefix, &child.href, kind));
            find_in_children(&child.children, &candidate, current_path, steps);
            return true;
        }
        if child.is_leaf() {
            continue;
        }
        let mark = steps.len();
        steps.push(ChainStep::new(index, prefix, &child.href, MatchKind::Ancestor));
        if find_in_children(&child.children, &candidate, current_path, steps) {
            return true;
        }
        steps.truncate(mark);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_tree() -> Vec<NavigationGroup> {
        vec![NavigationGroup::new(
            "A",
            vec![LinkNode::branch("X", "/x", vec![LinkNode::leaf("Y", "/y")])],
        )]
    }

    fn contracts_tree() -> Vec<NavigationGroup> {
        vec![
            NavigationGroup::new("Docs", vec![LinkNode::leaf("Introduction", "/")]),
            NavigationGroup::new(
                "Blockchain",
                vec![
                    LinkNode::leaf("Staking", "/staking"),
                    LinkNode::branch(
                        "Smart Contracts",
                        "/smart-contracts",
                        vec![
                            LinkNode::branch(
                                "Reference",
                                "/reference",
                                vec![LinkNode::leaf("Modules", "/modules"), LinkNode::leaf("Calls", "/calls")],
                            ),
                            LinkNode::branch(
                                "Testing",
                                "/testing",
                                vec![LinkNode::branch(
                                    "Scenarios",
                                    "/scenarios",
                                    vec![LinkNode::leaf("Simple Values", "/simple-values")],
                                )],
                            ),
                        ],
                    ),
                    LinkNode::leaf("Contracts", "/contracts"),
                ],
            ),
        ]
    }

    #[test]
    fn nested_leaf_resolves_full_chain() {
        let tree = scenario_tree();
        let chain = resolve_active_chain(&tree, "/x/y").expect("chain");
        assert_eq!(chain.group_index(), 0);
        let nodes = chain.nodes(&tree).expect("nodes");
        let titles: Vec<_> = nodes.iter().map(|node| node.title.as_str()).collect();
        assert_eq!(titles, vec!["X", "Y"]);
        assert_eq!(chain.steps()[0].kind, MatchKind::Ancestor);
        assert_eq!(chain.leaf().kind, MatchKind::Exact);
        assert!(chain.is_from_children());
        let entries: Vec<_> = chain.entries().collect();
        assert_eq!(entries, vec![(0, 0, ""), (0, 0, "/x")]);
    }

    #[test]
    fn top_level_exact_match_is_single_step() {
        let tree = contracts_tree();
        let chain = resolve_active_chain(&tree, "/staking").expect("chain");
        assert_eq!(chain.group_index(), 1);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.top_level_index(), 0);
        assert!(!chain.is_from_children());
    }

    #[test]
    fn top_level_links_do_not_use_containment() {
        let tree = contracts_tree();
        assert!(resolve_active_chain(&tree, "/staking/rewards").is_none());
    }

    #[test]
    fn four_level_path_resolves() {
        let tree = contracts_tree();
        let chain = resolve_active_chain(&tree, "/smart-contracts/testing/scenarios/simple-values").expect("chain");
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.leaf_address(), NodeAddress::new(1, vec![1, 1, 0, 0]));
        assert_eq!(chain.leaf().ancestor_prefix, "/smart-contracts/testing/scenarios");
        assert_eq!(chain.steps()[1].kind, MatchKind::Contains);
    }

    #[test]
    fn containment_keeps_parent_active_for_sub_routes_and_anchors() {
        let tree = contracts_tree();
        let chain = resolve_active_chain(&tree, "/smart-contracts/reference/storage#mappers").expect("chain");
        assert_eq!(chain.leaf().path, "/smart-contracts/reference");
        assert_eq!(chain.leaf().kind, MatchKind::Contains);

        let anchored = resolve_active_chain(&tree, "/smart-contracts/reference/calls#payable").expect("chain");
        assert_eq!(anchored.leaf().path, "/smart-contracts/reference/calls");
    }

    #[test]
    fn unmapped_path_has_no_chain() {
        let tree = contracts_tree();
        assert!(resolve_active_chain(&tree, "/not-documented").is_none());
        assert!(resolve_active_chain(&tree, "").is_none());
        assert!(resolve_active_chain(&[], "/staking").is_none());
    }

    #[test]
    fn first_group_wins_on_duplicate_paths() {
        let tree = vec![
            NavigationGroup::new("First", vec![LinkNode::leaf("Dup", "/dup")]),
            NavigationGroup::new("Second", vec![LinkNode::leaf("Dup", "/dup")]),
        ];
        assert_eq!(active_group_index(&tree, "/dup"), Some(0));
    }

    #[test]
    fn first_sibling_wins_under_loose_containment() {
        let tree = vec![NavigationGroup::new(
            "G",
            vec![LinkNode::branch(
                "Root",
                "/root",
                vec![LinkNode::leaf("Contracts", "/contracts"), LinkNode::leaf("Legacy", "/contracts-legacy")],
            )],
        )];
        let chain = resolve_active_chain(&tree, "/root/contracts-legacy").expect("chain");
        assert_eq!(chain.leaf().path, "/root/contracts");
        assert_eq!(chain.leaf().kind, MatchKind::Contains);
    }

    #[test]
    fn resolution_is_idempotent() {
        let tree = contracts_tree();
        let path = "/smart-contracts/reference/modules";
        assert_eq!(resolve_active_chain(&tree, path), resolve_active_chain(&tree, path));
    }

    #[test]
    fn passes_through_prefix_addresses() {
        let tree = contracts_tree();
        let chain = resolve_active_chain(&tree, "/smart-contracts/reference/modules").expect("chain");
        assert!(chain.passes_through(&NodeAddress::new(1, vec![1])));
        assert!(chain.passes_through(&NodeAddress::new(1, vec![1, 0])));
        assert!(chain.passes_through(&NodeAddress::new(1, vec![1, 0, 0])));
        assert!(!chain.passes_through(&NodeAddress::new(1, vec![1, 1])));
        assert!(!chain.passes_through(&NodeAddress::new(0, vec![1])));
        assert_eq!(chain.addresses().len(), 3);
    }

    #[test]
    fn group_and_descendant_helpers() {
        let tree = contracts_tree();
        assert!(is_active_group(&tree[1], "/smart-contracts/reference"));
        assert!(!is_active_group(&tree[0], "/smart-contracts/reference"));
        assert!(has_active_descendant(&tree[1].links[1].children, "/smart-contracts", "/smart-contracts/testing"));
        assert!(!has_active_descendant(&tree[1].links[1].children, "/smart-contracts", "/smart"));
        assert_eq!(is_nested_match("/a", "/a/b"), Some(MatchKind::Contains));
        assert_eq!(is_nested_match("/a/b", "/a"), None);
    }
}
