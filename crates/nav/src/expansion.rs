//! Derived expansion state and the flattened sidebar rows.
//!
//! Nothing here is stored between resolutions. A subtree is open exactly when
//! the active chain passes through it; closing happens by the chain moving
//! elsewhere, and the enter/exit transitions are computed by diffing two
//! expansion sets.

use std::collections::BTreeSet;

use kdocs_types::{LinkNode, NavigationGroup, SectionStore};
use serde::Serialize;

use crate::resolve::{ActiveChain, is_nested_match};
use crate::tree::{NodeAddress, join_href, node_at};

/// Indentation (in spacing units) of top-level link rows.
pub const TOP_LEVEL_INDENT: usize = 4;
/// Indentation of in-page anchor rows.
pub const ANCHOR_INDENT: usize = 7;
/// Nested rows never indent further than this.
pub const MAX_NESTED_INDENT: usize = 10;
/// Filler glyph prefixed to titles nested deeper than two levels.
pub const DEPTH_FILLER: char = '\u{3164}';

/// Set of nodes whose children are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpansionSet {
    expanded: BTreeSet<NodeAddress>,
}

impl ExpansionSet {
    /// Every node on the chain that has children.
    pub fn from_chain(tree: &[NavigationGroup], chain: Option<&ActiveChain>) -> Self {
        let Some(chain) = chain else {
            return Self::default();
        };
        let expanded = chain
            .addresses()
            .into_iter()
            .filter(|address| node_at(tree, address).is_some_and(|node| !node.is_leaf()))
            .collect();
        Self { expanded }
    }

    pub fn is_expanded(&self, address: &NodeAddress) -> bool {
        self.expanded.contains(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeAddress> {
        self.expanded.iter()
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// Animation phase of an expandable subtree between two resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Entering,
    Present,
    Exiting,
}

/// Compares the previous and current expansion sets, ordered by address.
pub fn transitions(previous: &ExpansionSet, current: &ExpansionSet) -> Vec<(NodeAddress, Transition)> {
    let mut phases: Vec<(NodeAddress, Transition)> = previous
        .expanded
        .union(&current.expanded)
        .map(|address| {
            let phase = match (previous.is_expanded(address), current.is_expanded(address)) {
                (true, true) => Transition::Present,
                (false, true) => Transition::Entering,
                _ => Transition::Exiting,
            };
            (address.clone(), phase)
        })
        .collect();
    phases.sort_by(|left, right| left.0.cmp(&right.0));
    phases
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    GroupTitle,
    Link,
    /// In-page section link under the active top-level page.
    Anchor,
}

/// One rendered line of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarRow {
    pub kind: RowKind,
    pub group_index: usize,
    /// Tree address for link rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<NodeAddress>,
    pub title: String,
    /// Title as displayed, with the depth filler applied.
    pub label: String,
    /// Absolute href; empty for group titles.
    pub href: String,
    /// Nesting level: 0 for group titles and top-level links, 1 for their
    /// children and so on. Anchors sit at level 1.
    pub level: usize,
    pub indent: usize,
    pub active: bool,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Indentation for a nested row at `level` (1 for direct children).
pub fn nested_indent(level: usize) -> usize {
    ((level + 1) * 3 + 1).min(MAX_NESTED_INDENT)
}

/// Display label for a nested row: rows deeper than two levels get one
/// filler glyph per extra level.
pub fn nested_label(level: usize, title: &str) -> String {
    if level > 2 {
        let filler: String = std::iter::repeat_n(DEPTH_FILLER, level - 2).collect();
        format!("{filler} {title}")
    } else {
        title.to_string()
    }
}

/// Flattens the sidebar for `current_path`.
pub fn project_rows(
    tree: &[NavigationGroup],
    current_path: &str,
    chain: Option<&ActiveChain>,
    sections: &SectionStore,
) -> Vec<SidebarRow> {
    let expansion = ExpansionSet::from_chain(tree, chain);
    project_rows_with(tree, current_path, chain, &expansion, sections)
}

/// Same as [`project_rows`] over an already derived expansion set, so the
/// rows and the set a caller keeps cannot disagree.
pub fn project_rows_with(
    tree: &[NavigationGroup],
    current_path: &str,
    chain: Option<&ActiveChain>,
    expansion: &ExpansionSet,
    sections: &SectionStore,
) -> Vec<SidebarRow> {
    let mut rows = Vec::new();
    for (group_index, group) in tree.iter().enumerate() {
        rows.push(SidebarRow {
            kind: RowKind::GroupTitle,
            group_index,
            address: None,
            title: group.title.clone(),
            label: group.title.clone(),
            href: String::new(),
            level: 0,
            indent: 0,
            active: chain.is_some_and(|chain| chain.group_index() == group_index),
            expanded: false,
            tag: None,
        });
        for (link_index, link) in group.links.iter().enumerate() {
            let address = NodeAddress::new(group_index, vec![link_index]);
            let expanded = expansion.is_expanded(&address);
            let active = link.href == current_path;
            rows.push(SidebarRow {
                kind: RowKind::Link,
                group_index,
                address: Some(address.clone()),
                title: link.title.clone(),
                label: link.title.clone(),
                href: link.href.clone(),
                level: 0,
                indent: TOP_LEVEL_INDENT,
                active,
                expanded,
                tag: None,
            });
            if expanded {
                push_nested_rows(&link.children, &link.href, &address, 1, current_path, expansion, &mut rows);
            } else if active && link.is_leaf() {
                push_anchor_rows(group_index, &link.href, sections, &mut rows);
            }
        }
    }
    rows
}

fn push_nested_rows(
    children: &[LinkNode],
    prefix: &str,
    parent: &NodeAddress,
    level: usize,
    current_path: &str,
    expansion: &ExpansionSet,
    rows: &mut Vec<SidebarRow>,
) {
    for (index, child) in children.iter().enumerate() {
        let address = parent.child(index);
        let href = join_href(prefix, &child.href);
        let expanded = expansion.is_expanded(&address);
        rows.push(SidebarRow {
            kind: RowKind::Link,
            group_index: parent.group_index,
            address: Some(address.clone()),
            title: child.title.clone(),
            label: nested_label(level, &child.title),
            href: href.clone(),
            level,
            indent: nested_indent(level),
            active: is_nested_match(&href, current_path).is_some(),
            expanded,
            tag: None,
        });
        if expanded {
            push_nested_rows(&child.children, &href, &address, level + 1, current_path, expansion, rows);
        }
    }
}

fn push_anchor_rows(group_index: usize, href: &str, sections: &SectionStore, rows: &mut Vec<SidebarRow>) {
    for section in &sections.sections {
        rows.push(SidebarRow {
            kind: RowKind::Anchor,
            group_index,
            address: None,
            title: section.title.clone(),
            label: section.title.clone(),
            href: format!("{href}#{}", section.id),
            level: 1,
            indent: ANCHOR_INDENT,
            active: false,
            expanded: false,
            tag: section.tag.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_active_chain;
    use kdocs_types::Section;

    fn tree() -> Vec<NavigationGroup> {
        vec![
            NavigationGroup::new("Wallet", vec![LinkNode::leaf("Quickstart", "/quickstart")]),
            NavigationGroup::new(
                "Blockchain",
                vec![
                    LinkNode::leaf("Staking", "/staking"),
                    LinkNode::branch(
                        "Smart Contracts",
                        "/smart-contracts",
                        vec![
                            LinkNode::branch("Reference", "/reference", vec![LinkNode::leaf("Modules", "/modules")]),
                            LinkNode::branch(
                                "Testing",
                                "/testing",
                                vec![LinkNode::branch(
                                    "Scenarios",
                                    "/scenarios",
                                    vec![LinkNode::leaf("JSON Structure", "/JSON-structure")],
                                )],
                            ),
                        ],
                    ),
                ],
            ),
        ]
    }

    fn rows_for(path: &str, sections: &SectionStore) -> Vec<SidebarRow> {
        let tree = tree();
        let chain = resolve_active_chain(&tree, path);
        project_rows(&tree, path, chain.as_ref(), sections)
    }

    #[test]
    fn unmatched_path_renders_collapsed_tree() {
        let rows = rows_for("/nowhere", &SectionStore::default());
        let titles: Vec<_> = rows.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(titles, vec!["Wallet", "Quickstart", "Blockchain", "Staking", "Smart Contracts"]);
        assert!(rows.iter().all(|row| !row.active && !row.expanded));
    }

    #[test]
    fn chain_expands_every_ancestor() {
        let path = "/smart-contracts/testing/scenarios/JSON-structure";
        let rows = rows_for(path, &SectionStore::default());
        let titles: Vec<_> = rows.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Wallet",
                "Quickstart",
                "Blockchain",
                "Staking",
                "Smart Contracts",
                "Reference",
                "Testing",
                "Scenarios",
                "JSON Structure",
            ]
        );
        let leaf = rows.last().expect("leaf row");
        assert_eq!(leaf.href, path);
        assert!(leaf.active);
        assert_eq!(leaf.level, 3);
        assert_eq!(leaf.indent, MAX_NESTED_INDENT);
        assert_eq!(leaf.label, format!("{DEPTH_FILLER} JSON Structure"));

        let reference = rows.iter().find(|row| row.title == "Reference").expect("reference row");
        assert!(!reference.active && !reference.expanded);
        assert_eq!(reference.indent, 7);

        let contracts = rows.iter().find(|row| row.title == "Smart Contracts").expect("contracts row");
        assert!(contracts.expanded);
        assert!(!contracts.active);
        assert!(rows.iter().find(|row| row.title == "Blockchain").is_some_and(|row| row.active));
    }

    #[test]
    fn top_level_branch_expands_on_exact_match() {
        let rows = rows_for("/smart-contracts", &SectionStore::default());
        let contracts = rows.iter().find(|row| row.title == "Smart Contracts").expect("row");
        assert!(contracts.active && contracts.expanded);
        assert!(rows.iter().any(|row| row.title == "Reference"));
        assert!(!rows.iter().any(|row| row.title == "Modules"));
    }

    #[test]
    fn active_leaf_lists_section_anchors() {
        let sections = SectionStore::new(
            vec![Section::new("delegate", "Delegate"), Section::new("claim", "Claim").with_tag("POST")],
            vec![],
        );
        let rows = rows_for("/staking", &sections);
        let anchors: Vec<_> = rows.iter().filter(|row| row.kind == RowKind::Anchor).collect();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].href, "/staking#delegate");
        assert_eq!(anchors[1].tag.as_deref(), Some("POST"));
        assert_eq!(anchors[0].indent, ANCHOR_INDENT);

        let other = rows_for("/quickstart", &SectionStore::default());
        assert!(other.iter().all(|row| row.kind != RowKind::Anchor));
    }

    #[test]
    fn transitions_diff_expansion_sets() {
        let tree = tree();
        let before = resolve_active_chain(&tree, "/smart-contracts/reference/modules");
        let after = resolve_active_chain(&tree, "/smart-contracts/testing");
        let previous = ExpansionSet::from_chain(&tree, before.as_ref());
        let current = ExpansionSet::from_chain(&tree, after.as_ref());
        assert_eq!(previous.len(), 2);

        let phases = transitions(&previous, &current);
        assert_eq!(
            phases,
            vec![
                (NodeAddress::new(1, vec![1]), Transition::Present),
                (NodeAddress::new(1, vec![1, 0]), Transition::Exiting),
                (NodeAddress::new(1, vec![1, 1]), Transition::Entering),
            ]
        );
    }

    #[test]
    fn indentation_and_labels() {
        assert_eq!(nested_indent(1), 7);
        assert_eq!(nested_indent(2), 10);
        assert_eq!(nested_indent(5), 10);
        assert_eq!(nested_label(2, "Data"), "Data");
        assert_eq!(nested_label(4, "Deep"), format!("{DEPTH_FILLER}{DEPTH_FILLER} Deep"));
    }
}
