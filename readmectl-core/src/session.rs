//! Persisted editor sessions.
//!
//! A session file is a versioned JSON snapshot of the editor lists plus
//! the full template catalog, so custom sections and body edits survive a
//! restart. Saves go through a temp file and rename; a half-written
//! session is never observed.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::TemplateCatalog;
use crate::editor::SectionEditor;
use crate::error::{ReadmeError, Result};
use crate::template::SectionTemplate;

pub const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub selected: Vec<String>,
    pub available: Vec<String>,
    #[serde(default)]
    pub focused: Option<String>,
    /// Full catalog at save time, custom sections and edits included
    #[serde(default)]
    pub templates: Vec<SectionTemplate>,
}

impl SessionState {
    /// Snapshot the current editor and catalog
    pub fn capture(editor: &SectionEditor, catalog: &TemplateCatalog) -> Self {
        Self {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            selected: editor.selected().to_vec(),
            available: editor.available().to_vec(),
            focused: editor.focused().map(str::to_string),
            templates: catalog.iter().cloned().collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&data)
            .map_err(|err| ReadmeError::json(path.display().to_string(), err))?;
        if state.version != SESSION_VERSION {
            return Err(ReadmeError::SessionVersion {
                found: state.version,
                expected: SESSION_VERSION,
            });
        }
        Ok(state)
    }

    /// Atomic save: write a sibling temp file, fsync, rename over the
    /// target.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_vec_pretty(self)
            .map_err(|err| ReadmeError::json("session state", err))?;

        let mut tmp_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Rebuild editor state against the live catalog.
    ///
    /// Session templates are upserted first (restoring customs and body
    /// edits), then the lists are reconciled: selected keeps its saved
    /// order minus slugs the catalog no longer knows, available keeps its
    /// saved order, and catalog slugs the session never saw are appended
    /// to available. Each slug ends up in exactly one list.
    pub fn restore(self, catalog: &mut TemplateCatalog) -> SectionEditor {
        for template in self.templates {
            catalog.upsert(template);
        }

        let mut selected: Vec<String> = Vec::new();
        for slug in self.selected {
            if !catalog.contains(&slug) {
                debug!(slug = %slug, "session slug unknown to catalog, dropping");
                continue;
            }
            if !selected.contains(&slug) {
                selected.push(slug);
            }
        }

        let mut available: Vec<String> = Vec::new();
        for slug in self.available {
            if catalog.contains(&slug)
                && !selected.contains(&slug)
                && !available.contains(&slug)
            {
                available.push(slug);
            }
        }
        for slug in catalog.slugs() {
            if !selected.iter().any(|s| s == slug) && !available.iter().any(|s| s == slug) {
                available.push(slug.to_string());
            }
        }

        SectionEditor::from_parts(available, selected, self.focused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::SectionTemplate;

    fn small_catalog() -> TemplateCatalog {
        let mut catalog = TemplateCatalog::empty();
        catalog.upsert(SectionTemplate::new("title", "Title", "# T\n"));
        catalog.upsert(SectionTemplate::new("usage", "Usage", "## U\n"));
        catalog.upsert(SectionTemplate::new("faq", "FAQ", "## F\n"));
        catalog
    }

    #[test]
    fn capture_save_load_roundtrip() {
        let mut catalog = small_catalog();
        let mut editor = SectionEditor::with_defaults(&catalog);
        editor.add("usage");
        let custom = editor.add_custom(&mut catalog);
        catalog.update_body(&custom, "## Mine\n\nEdited.\n");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionState::capture(&editor, &catalog).save(&path).unwrap();

        let loaded = SessionState::load(&path).unwrap();
        assert_eq!(loaded.version, SESSION_VERSION);
        assert_eq!(loaded.selected, editor.selected());
        assert_eq!(loaded.focused.as_deref(), Some(custom.as_str()));

        let mut fresh = small_catalog();
        let restored = loaded.restore(&mut fresh);
        assert_eq!(restored.selected(), editor.selected());
        assert_eq!(fresh.get(&custom).unwrap().markdown, "## Mine\n\nEdited.\n");
    }

    #[test]
    fn load_rejects_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"version":99,"saved_at":"2026-01-01T00:00:00Z","selected":[],"available":[]}"#,
        )
        .unwrap();

        let err = SessionState::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ReadmeError::SessionVersion { found: 99, expected: SESSION_VERSION }
        ));
    }

    #[test]
    fn load_reports_malformed_json_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = SessionState::load(&path).unwrap_err();
        assert!(err.to_string().contains("session.json"));
    }

    #[test]
    fn restore_reconciles_catalog_drift() {
        let state = SessionState {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            selected: vec!["usage".into(), "removed-slug".into(), "usage".into()],
            available: vec!["faq".into()],
            focused: Some("removed-slug".into()),
            templates: vec![],
        };

        // "title" is new since the session was saved
        let mut catalog = small_catalog();
        let editor = state.restore(&mut catalog);

        assert_eq!(editor.selected(), ["usage"]);
        assert_eq!(editor.available(), ["faq", "title"]);
        // focus pointed at a dropped slug
        assert_eq!(editor.focused(), None);
    }

    #[test]
    fn restore_brings_back_custom_sections() {
        let state = SessionState {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            selected: vec!["custom-abc123".into()],
            available: vec![],
            focused: None,
            templates: vec![SectionTemplate::new("custom-abc123", "Custom", "## C\n")],
        };

        let mut catalog = small_catalog();
        let editor = state.restore(&mut catalog);

        assert!(catalog.contains("custom-abc123"));
        assert_eq!(editor.selected(), ["custom-abc123"]);
        assert_eq!(editor.available().len(), 3);
    }

    #[test]
    fn save_replaces_existing_file_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let catalog = small_catalog();
        let editor = SectionEditor::with_defaults(&catalog);

        SessionState::capture(&editor, &catalog).save(&path).unwrap();
        SessionState::capture(&editor, &catalog).save(&path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("session.json.tmp").exists());
    }
}
