//! One-shot command output, kept free of I/O so it can be tested.

use kdocs_nav::{
    ExpansionSet, LayoutMetrics, MatchKind, Presence, RowKind, SidebarGeometry, SidebarRow, project_geometry,
    project_rows, resolve_active_chain,
};
use kdocs_types::{NavigationGroup, SectionStore};
use serde_json::{Value, json};

/// Active chain for `path` as JSON: group, per-step match kinds and the
/// expanded subtrees.
pub fn resolve(tree: &[NavigationGroup], path: &str) -> Value {
    let Some(chain) = resolve_active_chain(tree, path) else {
        return json!({ "path": path, "active": false });
    };
    let nodes = chain.nodes(tree).unwrap_or_default();
    let steps: Vec<Value> = chain
        .steps()
        .iter()
        .zip(chain.addresses())
        .zip(nodes)
        .map(|((step, address), node)| {
            json!({
                "title": node.title,
                "href": step.path,
                "address": address.to_string(),
                "match": match step.kind {
                    MatchKind::Exact => "exact",
                    MatchKind::Contains => "contains",
                    MatchKind::Ancestor => "ancestor",
                },
            })
        })
        .collect();
    let expanded: Vec<String> = ExpansionSet::from_chain(tree, Some(&chain)).iter().map(ToString::to_string).collect();
    json!({
        "path": path,
        "active": true,
        "group": tree[chain.group_index()].title,
        "group_index": chain.group_index(),
        "from_children": chain.is_from_children(),
        "chain": steps,
        "expanded": expanded,
    })
}

pub fn rows(tree: &[NavigationGroup], path: &str, sections: &SectionStore) -> Vec<SidebarRow> {
    let chain = resolve_active_chain(tree, path);
    project_rows(tree, path, chain.as_ref(), sections)
}

/// Plain-text sidebar: one row per line, `>` on active rows, `-` before
/// expanded ones.
pub fn render_rows(rows: &[SidebarRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = if row.active { '>' } else { ' ' };
        match row.kind {
            RowKind::GroupTitle => {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&format!("{marker} {}\n", row.label.to_uppercase()));
            }
            RowKind::Link | RowKind::Anchor => {
                let expanded = if row.expanded { "- " } else { "" };
                let tag = row.tag.as_deref().map(|tag| format!(" [{tag}]")).unwrap_or_default();
                out.push_str(&format!(
                    "{marker}{:indent$}{expanded}{}{tag}\n",
                    "",
                    row.label,
                    indent = row.indent
                ));
            }
        }
    }
    out
}

pub fn geometry(
    tree: &[NavigationGroup],
    path: &str,
    sections: &SectionStore,
    presence: Presence,
    metrics: &LayoutMetrics,
) -> Option<SidebarGeometry> {
    let chain = resolve_active_chain(tree, path);
    project_geometry(tree, chain.as_ref(), sections, presence, metrics)
}
