//! Two-list section editor state.
//!
//! A [`SectionEditor`] splits the catalog's slugs into `available` (the
//! pool) and `selected` (the document, in order). Every mutation goes
//! through [`EditorOp`], and invalid operations degrade to no-ops rather
//! than panicking: stale input from a UI gesture must never corrupt the
//! lists.
//!
//! Invariant: each catalog slug lives in exactly one of the two lists,
//! and `focused` (when set) names a selected slug.

use tracing::debug;

use crate::catalog::TemplateCatalog;
use crate::template::DEFAULT_SELECTED;

/// One editor mutation, typically produced by a UI gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOp {
    /// Move a slug from available to the end of selected and focus it
    Add { slug: String },
    /// Create a fresh custom section, select it, and focus it
    AddCustom,
    /// Move a slug from selected back to available and clear focus
    Remove { slug: String },
    /// Move `from` to `to`'s position within selected
    Reorder { from: String, to: String },
    /// Mark a selected slug as the one open for editing
    Focus { slug: String },
}

#[derive(Debug, Clone, Default)]
pub struct SectionEditor {
    available: Vec<String>,
    selected: Vec<String>,
    focused: Option<String>,
}

impl SectionEditor {
    /// Default layout: [`DEFAULT_SELECTED`] slugs (those the catalog
    /// knows) selected, everything else available in catalog order.
    pub fn with_defaults(catalog: &TemplateCatalog) -> Self {
        let selected: Vec<String> = DEFAULT_SELECTED
            .iter()
            .filter(|slug| catalog.contains(slug))
            .map(|slug| slug.to_string())
            .collect();
        let available = catalog
            .slugs()
            .filter(|slug| !selected.iter().any(|s| s == slug))
            .map(str::to_string)
            .collect();
        Self {
            available,
            selected,
            focused: None,
        }
    }

    /// Rebuild from stored lists. A focused slug that is not selected is
    /// dropped so the invariant holds no matter what was persisted.
    pub fn from_parts(
        available: Vec<String>,
        selected: Vec<String>,
        focused: Option<String>,
    ) -> Self {
        let focused = focused.filter(|slug| selected.iter().any(|s| s == slug));
        Self {
            available,
            selected,
            focused,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_selected(&self, slug: &str) -> bool {
        self.selected.iter().any(|s| s == slug)
    }

    pub fn is_available(&self, slug: &str) -> bool {
        self.available.iter().any(|s| s == slug)
    }

    /// Apply one operation. Returns true when any state changed; invalid
    /// operations leave everything untouched and return false.
    pub fn apply(&mut self, op: EditorOp, catalog: &mut TemplateCatalog) -> bool {
        match op {
            EditorOp::Add { slug } => self.add(&slug),
            EditorOp::AddCustom => {
                self.add_custom(catalog);
                true
            }
            EditorOp::Remove { slug } => self.remove(&slug),
            EditorOp::Reorder { from, to } => self.reorder(&from, &to),
            EditorOp::Focus { slug } => self.focus(&slug),
        }
    }

    /// Select a slug: it leaves available, joins the end of selected,
    /// and becomes focused. A slug not in available is a no-op.
    pub fn add(&mut self, slug: &str) -> bool {
        let Some(pos) = self.available.iter().position(|s| s == slug) else {
            debug!(slug = %slug, "add: slug not available, ignoring");
            return false;
        };
        let slug = self.available.remove(pos);
        self.focused = Some(slug.clone());
        self.selected.push(slug);
        true
    }

    /// Create a custom section in the catalog and select it immediately.
    /// Returns the new slug.
    pub fn add_custom(&mut self, catalog: &mut TemplateCatalog) -> String {
        let slug = catalog.create_custom();
        self.focused = Some(slug.clone());
        self.selected.push(slug.clone());
        slug
    }

    /// Deselect a slug: it leaves selected, rejoins available, and focus
    /// clears. A slug not in selected leaves both lists and the focus
    /// untouched.
    pub fn remove(&mut self, slug: &str) -> bool {
        let Some(pos) = self.selected.iter().position(|s| s == slug) else {
            debug!(slug = %slug, "remove: slug not selected, ignoring");
            return false;
        };
        let slug = self.selected.remove(pos);
        self.available.push(slug);
        self.focused = None;
        true
    }

    /// Move `from` to `to`'s position in selected, shifting the elements
    /// between them by one. Equal or unknown slugs are a no-op.
    pub fn reorder(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        let old = self.selected.iter().position(|s| s == from);
        let new = self.selected.iter().position(|s| s == to);
        let (Some(old), Some(new)) = (old, new) else {
            debug!(from = %from, to = %to, "reorder: slug not selected, ignoring");
            return false;
        };
        let slug = self.selected.remove(old);
        self.selected.insert(new, slug);
        true
    }

    /// Focus a selected slug for editing. Unselected slugs and refocusing
    /// the current slug are no-ops.
    pub fn focus(&mut self, slug: &str) -> bool {
        if !self.is_selected(slug) {
            debug!(slug = %slug, "focus: slug not selected, ignoring");
            return false;
        }
        if self.focused.as_deref() == Some(slug) {
            return false;
        }
        self.focused = Some(slug.to_string());
        true
    }

    /// Back to the default layout. Custom sections stay in the catalog and
    /// land in available.
    pub fn reset(&mut self, catalog: &TemplateCatalog) {
        *self = Self::with_defaults(catalog);
    }

    /// Available slugs in display order: sorted by display name with the
    /// slug as tie-breaker. Sorts a copy; the stored order never changes.
    pub fn alphabetized_available(&self, catalog: &TemplateCatalog) -> Vec<String> {
        let mut slugs = self.available.clone();
        slugs.sort_by(|a, b| {
            catalog
                .display_name(a)
                .cmp(catalog.display_name(b))
                .then_with(|| a.cmp(b))
        });
        slugs
    }
}
