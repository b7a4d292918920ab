//! Path-change coordination.
//!
//! Every navigation bumps a generation counter. A [`Resolution`] remembers
//! the generation it was computed for and is only applied if no newer path
//! arrived in the meantime, so stale geometry is never shown.
//!
//! The session can also freeze its inputs. The mobile drawer does this while
//! it is open so the sidebar does not change under its close animation; the
//! next open captures fresh inputs.

use kdocs_types::{NavigationGroup, SectionStore};
use serde::Serialize;
use tracing::{debug, trace};

use crate::expansion::{ExpansionSet, SidebarRow, Transition, project_rows_with, transitions};
use crate::layout::{LayoutMetrics, Presence, SidebarGeometry, project_geometry};
use crate::resolve::{ActiveChain, resolve_active_chain};
use crate::tree::NodeAddress;

/// Sequence number of a path change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Everything the sidebar needs for one path, computed in a single pass.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub generation: Generation,
    pub path: String,
    pub chain: Option<ActiveChain>,
    pub expansion: ExpansionSet,
    pub rows: Vec<SidebarRow>,
    pub geometry: Option<SidebarGeometry>,
}

impl Resolution {
    /// Resolves `path` against `tree` and projects rows and geometry from the
    /// same chain.
    pub fn compute(
        generation: Generation,
        tree: &[NavigationGroup],
        path: &str,
        sections: &SectionStore,
        presence: Presence,
        metrics: &LayoutMetrics,
    ) -> Self {
        let chain = resolve_active_chain(tree, path);
        let expansion = ExpansionSet::from_chain(tree, chain.as_ref());
        let rows = project_rows_with(tree, path, chain.as_ref(), &expansion, sections);
        let geometry = project_geometry(tree, chain.as_ref(), sections, presence, metrics);
        Self {
            generation,
            path: path.to_string(),
            chain,
            expansion,
            rows,
            geometry,
        }
    }
}

/// Outcome of [`NavigationSession::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    /// A newer path arrived after this resolution started.
    DiscardedStale { resolved: Generation, latest: Generation },
}

#[derive(Debug, Clone)]
struct FrozenInputs {
    path: String,
    sections: SectionStore,
}

/// Tracks the current path and the last applied resolution.
#[derive(Debug, Clone, Default)]
pub struct NavigationSession {
    latest: Generation,
    current_path: String,
    sections: SectionStore,
    frozen: Option<FrozenInputs>,
    committed: Option<Resolution>,
    last_transitions: Vec<(NodeAddress, Transition)>,
}

impl NavigationSession {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            current_path: path.into(),
            ..Self::default()
        }
    }

    /// Records a path change and returns its generation.
    pub fn navigate(&mut self, path: impl Into<String>) -> Generation {
        self.current_path = path.into();
        self.latest = self.latest.next();
        trace!(path = %self.current_path, generation = self.latest.value(), "navigation");
        self.latest
    }

    /// Replaces the scroll-spy snapshot. Section changes do not start a new
    /// generation; they are picked up by the next resolution.
    pub fn update_sections(&mut self, sections: SectionStore) {
        self.sections = sections;
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Path and sections the next resolution will use: the frozen snapshot
    /// while frozen, otherwise the live values.
    pub fn inputs(&self) -> (&str, &SectionStore) {
        match &self.frozen {
            Some(frozen) => (&frozen.path, &frozen.sections),
            None => (&self.current_path, &self.sections),
        }
    }

    /// Captures the current inputs; later path and section changes are
    /// recorded but not resolved until [`Self::thaw`].
    pub fn freeze(&mut self) {
        self.frozen = Some(FrozenInputs {
            path: self.current_path.clone(),
            sections: self.sections.clone(),
        });
    }

    pub fn thaw(&mut self) {
        self.frozen = None;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Resolves the current inputs for the latest generation.
    pub fn resolve(&self, tree: &[NavigationGroup], presence: Presence, metrics: &LayoutMetrics) -> Resolution {
        let (path, sections) = self.inputs();
        Resolution::compute(self.latest, tree, path, sections, presence, metrics)
    }

    /// Applies `resolution` unless a newer path has been recorded since.
    pub fn commit(&mut self, resolution: Resolution) -> CommitOutcome {
        if resolution.generation != self.latest {
            debug!(
                resolved = resolution.generation.value(),
                latest = self.latest.value(),
                "discarding stale resolution"
            );
            return CommitOutcome::DiscardedStale {
                resolved: resolution.generation,
                latest: self.latest,
            };
        }
        self.apply(resolution);
        CommitOutcome::Applied
    }

    /// Resolves and commits in one synchronous pass.
    pub fn refresh(&mut self, tree: &[NavigationGroup], presence: Presence, metrics: &LayoutMetrics) -> &Resolution {
        let resolution = self.resolve(tree, presence, metrics);
        self.apply(resolution)
    }

    pub fn committed(&self) -> Option<&Resolution> {
        self.committed.as_ref()
    }

    fn apply(&mut self, resolution: Resolution) -> &Resolution {
        let empty = ExpansionSet::default();
        let previous = self.committed.as_ref().map_or(&empty, |committed| &committed.expansion);
        self.last_transitions = transitions(previous, &resolution.expansion);
        self.committed.insert(resolution)
    }

    /// Expansion transitions produced by the last applied resolution.
    pub fn transitions(&self) -> &[(NodeAddress, Transition)] {
        &self.last_transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdocs_types::{LinkNode, Section};

    fn tree() -> Vec<NavigationGroup> {
        vec![NavigationGroup::new(
            "SDK",
            vec![
                LinkNode::leaf("Introduction", "/introduction"),
                LinkNode::branch("Contracts", "/contracts", vec![LinkNode::leaf("Calls", "/calls")]),
            ],
        )]
    }

    fn metrics() -> LayoutMetrics {
        LayoutMetrics::from_px(32.0, 4.0)
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let tree = tree();
        let mut session = NavigationSession::new("/introduction");
        session.navigate("/introduction");
        let stale = session.resolve(&tree, Presence::Present, &metrics());
        let latest = session.navigate("/contracts/calls");

        let outcome = session.commit(stale);
        assert_eq!(
            outcome,
            CommitOutcome::DiscardedStale {
                resolved: Generation(1),
                latest,
            }
        );
        assert!(session.committed().is_none());

        let fresh = session.resolve(&tree, Presence::Present, &metrics());
        assert_eq!(session.commit(fresh), CommitOutcome::Applied);
        let committed = session.committed().expect("committed");
        assert_eq!(committed.path, "/contracts/calls");
        assert_eq!(committed.generation, latest);
    }

    #[test]
    fn refresh_reports_entering_and_exiting_subtrees() {
        let tree = tree();
        let mut session = NavigationSession::new("/");
        session.navigate("/contracts/calls");
        session.refresh(&tree, Presence::Present, &metrics());
        assert_eq!(session.transitions(), &[(NodeAddress::new(0, vec![1]), Transition::Entering)]);

        session.navigate("/introduction");
        let resolution = session.refresh(&tree, Presence::Present, &metrics());
        assert!(resolution.expansion.is_empty());
        assert_eq!(session.transitions(), &[(NodeAddress::new(0, vec![1]), Transition::Exiting)]);
    }

    #[test]
    fn frozen_inputs_survive_navigation_until_thawed() {
        let tree = tree();
        let mut session = NavigationSession::new("/introduction");
        session.update_sections(SectionStore::new(vec![Section::new("setup", "Setup")], vec!["setup".into()]));
        session.freeze();
        session.navigate("/contracts/calls");
        session.update_sections(SectionStore::default());

        let (path, sections) = session.inputs();
        assert_eq!(path, "/introduction");
        assert_eq!(sections.sections.len(), 1);
        let resolution = session.refresh(&tree, Presence::Present, &metrics());
        assert_eq!(resolution.path, "/introduction");

        session.thaw();
        assert!(!session.is_frozen());
        let resolution = session.refresh(&tree, Presence::Present, &metrics());
        assert_eq!(resolution.path, "/contracts/calls");
    }

    #[test]
    fn rows_agree_with_the_committed_expansion() {
        let tree = tree();
        let mut session = NavigationSession::new("/");
        for path in ["/contracts/calls", "/introduction", "/contracts"] {
            session.navigate(path);
            let resolution = session.refresh(&tree, Presence::Present, &metrics());
            for row in &resolution.rows {
                let expanded = row.address.as_ref().is_some_and(|address| resolution.expansion.is_expanded(address));
                assert_eq!(row.expanded, expanded, "{path}: row {}", row.title);
            }
        }
    }

    #[test]
    fn unmapped_path_commits_empty_resolution() {
        let tree = tree();
        let mut session = NavigationSession::default();
        session.navigate("/404");
        let resolution = session.refresh(&tree, Presence::Present, &metrics());
        assert!(resolution.chain.is_none());
        assert!(resolution.geometry.is_none());
        assert!(resolution.rows.iter().all(|row| !row.active));
    }
}
