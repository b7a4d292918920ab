use serde::{Deserialize, Serialize};

/// Identifier of the implicit section that precedes the first heading.
pub const TOP_SECTION_ID: &str = "_top";

/// An in-page heading tracked by the scroll-spy collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Short badge shown next to the anchor link (e.g. "GET").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Snapshot of the current document's sections and which of them are in view.
///
/// This is read-only input to the resolver and projectors; it is produced by
/// whatever observes the viewport and handed over at call time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStore {
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Ids of the sections currently scrolled into view, topmost first.
    #[serde(default)]
    pub visible_sections: Vec<String>,
}

impl SectionStore {
    pub fn new(sections: Vec<Section>, visible_sections: Vec<String>) -> Self {
        Self {
            sections,
            visible_sections,
        }
    }

    /// Position of the first visible section, counting the implicit top
    /// section as index zero. Unknown or missing ids map to zero.
    pub fn first_visible_index(&self) -> usize {
        let Some(first) = self.visible_sections.first() else {
            return 0;
        };
        if first == TOP_SECTION_ID {
            return 0;
        }
        self.sections
            .iter()
            .position(|section| &section.id == first)
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_sections.len()
    }
}
