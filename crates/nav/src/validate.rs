//! Authoring checks for navigation trees.
//!
//! None of these are errors at runtime: the resolver tolerates every issue
//! reported here (first sibling wins, unmatched hrefs never activate). The
//! report exists so content authors can spot them before publishing.

use std::fmt;

use indexmap::IndexMap;
use kdocs_types::NavigationGroup;
use serde::Serialize;
use tracing::warn;

use crate::tree::{NodeAddress, walk};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthoringIssue {
    /// Several leaves concatenate to the same absolute path; only the first
    /// one can ever be active.
    DuplicatePath { path: String, addresses: Vec<NodeAddress> },
    /// An href that does not start with `/` cannot concatenate into a valid
    /// path.
    UnrootedHref { address: NodeAddress, href: String },
    EmptyGroup { group_index: usize, title: String },
}

impl fmt::Display for AuthoringIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthoringIssue::DuplicatePath { path, addresses } => {
                let list: Vec<String> = addresses.iter().map(ToString::to_string).collect();
                write!(f, "duplicate path {path} at {}", list.join(", "))
            }
            AuthoringIssue::UnrootedHref { address, href } => {
                write!(f, "href {href:?} at {address} does not start with '/'")
            }
            AuthoringIssue::EmptyGroup { group_index, title } => {
                write!(f, "group {group_index} ({title}) has no links")
            }
        }
    }
}

/// Lists authoring issues in traversal order.
pub fn validate(tree: &[NavigationGroup]) -> Vec<AuthoringIssue> {
    let mut issues = Vec::new();
    for (group_index, group) in tree.iter().enumerate() {
        if group.links.is_empty() {
            issues.push(AuthoringIssue::EmptyGroup {
                group_index,
                title: group.title.clone(),
            });
        }
    }

    let mut leaves: IndexMap<String, Vec<NodeAddress>> = IndexMap::new();
    for entry in walk(tree) {
        if !entry.node.href.starts_with('/') {
            issues.push(AuthoringIssue::UnrootedHref {
                address: entry.address.clone(),
                href: entry.node.href.clone(),
            });
        }
        if entry.is_leaf() {
            leaves.entry(entry.path).or_default().push(entry.address);
        }
    }
    issues.extend(
        leaves
            .into_iter()
            .filter(|(_, addresses)| addresses.len() > 1)
            .map(|(path, addresses)| AuthoringIssue::DuplicatePath { path, addresses }),
    );

    for issue in &issues {
        warn!(%issue, "navigation authoring issue");
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdocs_types::LinkNode;

    #[test]
    fn clean_tree_has_no_issues() {
        let tree = vec![NavigationGroup::new(
            "Blockchain",
            vec![
                LinkNode::branch("Data", "/data", vec![LinkNode::leaf("Simple Values", "/simple-values")]),
                LinkNode::branch("Scenarios", "/scenarios", vec![LinkNode::leaf("Simple Values", "/simple-values")]),
            ],
        )];
        assert!(validate(&tree).is_empty());
    }

    #[test]
    fn reports_duplicates_unrooted_and_empty_groups() {
        let tree = vec![
            NavigationGroup::new("Empty", vec![]),
            NavigationGroup::new("A", vec![LinkNode::leaf("Staking", "/staking")]),
            NavigationGroup::new(
                "B",
                vec![LinkNode::leaf("Staking again", "/staking"), LinkNode::leaf("Broken", "broken")],
            ),
        ];
        let issues = validate(&tree);
        assert_eq!(
            issues,
            vec![
                AuthoringIssue::EmptyGroup {
                    group_index: 0,
                    title: "Empty".into()
                },
                AuthoringIssue::UnrootedHref {
                    address: NodeAddress::new(2, vec![1]),
                    href: "broken".into()
                },
                AuthoringIssue::DuplicatePath {
                    path: "/staking".into(),
                    addresses: vec![NodeAddress::new(1, vec![0]), NodeAddress::new(2, vec![0])]
                },
            ]
        );
        assert_eq!(issues[2].to_string(), "duplicate path /staking at 1.0, 2.0");
    }
}
