use serde::{Deserialize, Deserializer, Serialize};

/// Ordered list of top-level groups. Order is display order.
pub type NavigationTree = Vec<NavigationGroup>;

/// A top-level named section of the sidebar (e.g. "Klever SDK").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationGroup {
    /// Heading rendered above the group's links.
    pub title: String,
    /// Top-level links in display order.
    #[serde(default)]
    pub links: Vec<LinkNode>,
}

impl NavigationGroup {
    pub fn new(title: impl Into<String>, links: Vec<LinkNode>) -> Self {
        Self {
            title: title.into(),
            links,
        }
    }
}

/// A recursive navigation entry.
///
/// `href` is a relative path segment. The absolute path of a node is the
/// concatenation of every ancestor's `href` followed by its own, with no
/// separator normalization, so segments must be authored to concatenate
/// into valid paths (`"/smart-contracts"` + `"/reference"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkNode {
    pub title: String,
    pub href: String,
    /// Nested entries. An absent key, `null` and `[]` all mean "leaf".
    #[serde(default, deserialize_with = "children_or_empty", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LinkNode>,
}

impl LinkNode {
    /// Creates a leaf link.
    pub fn leaf(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            children: Vec::new(),
        }
    }

    /// Creates a link with nested children.
    pub fn branch(title: impl Into<String>, href: impl Into<String>, children: Vec<LinkNode>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(LinkNode::depth).max().unwrap_or(0)
    }
}

fn children_or_empty<'de, D>(deserializer: D) -> Result<Vec<LinkNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LinkNode>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_missing_children_are_both_leaves() {
        let json = r#"[
            {"title": "A", "href": "/a"},
            {"title": "B", "href": "/b", "children": []},
            {"title": "C", "href": "/c", "children": null}
        ]"#;
        let links: Vec<LinkNode> = serde_json::from_str(json).expect("parse links");
        assert!(links.iter().all(LinkNode::is_leaf));
        assert_eq!(links[0], links[0].clone());
        assert_eq!(links[1], LinkNode::leaf("B", "/b"));
    }

    #[test]
    fn serialization_omits_empty_children() {
        let out = serde_json::to_string(&LinkNode::leaf("Staking", "/staking")).expect("serialize");
        assert_eq!(out, r#"{"title":"Staking","href":"/staking"}"#);
    }

    #[test]
    fn yaml_groups_parse_with_nested_children() {
        let yaml = r#"
- title: Klever Blockchain
  links:
    - title: Smart Contracts
      href: /smart-contracts
      children:
        - title: Reference
          href: /reference
          children:
            - title: Modules
              href: /modules
"#;
        let tree: NavigationTree = serde_yaml::from_str(yaml).expect("parse yaml");
        assert_eq!(tree.len(), 1);
        let contracts = &tree[0].links[0];
        assert_eq!(contracts.depth(), 3);
        assert_eq!(contracts.children[0].children[0].href, "/modules");
    }
}
