//! Template catalog: every section the editor can offer.
//!
//! The catalog is an ordered collection keyed by slug. Built-ins come
//! first, user templates loaded from a directory follow (overriding
//! built-ins on slug collision), and runtime custom sections are appended
//! as they are created.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ReadmeError, Result};
use crate::template::{builtin_templates, slugify, title_case, SectionTemplate};

/// First ATX heading in a markdown file, used as the display name
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^#{1,6}\s+(.+)$").expect("heading regex must compile")
});

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<SectionTemplate>,
}

impl TemplateCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog seeded with the stock template set
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&SectionTemplate> {
        self.templates.iter().find(|t| t.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Display name for a slug; falls back to the slug itself so stale
    /// references still render something meaningful.
    pub fn display_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.get(slug).map(|t| t.name.as_str()).unwrap_or(slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.slug.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionTemplate> {
        self.templates.iter()
    }

    /// Insert or replace by slug. Replacing keeps the original position so
    /// catalog order stays stable under session restores.
    pub fn upsert(&mut self, template: SectionTemplate) {
        match self.templates.iter_mut().find(|t| t.slug == template.slug) {
            Some(existing) => {
                debug!(slug = %template.slug, "replacing existing template");
                *existing = template;
            }
            None => self.templates.push(template),
        }
    }

    /// Replace a template's markdown body. Returns true only when the slug
    /// exists and the body actually changed.
    pub fn update_body(&mut self, slug: &str, markdown: &str) -> bool {
        match self.templates.iter_mut().find(|t| t.slug == slug) {
            Some(template) if template.markdown != markdown => {
                template.markdown = markdown.to_string();
                true
            }
            Some(_) => false,
            None => {
                debug!(slug = %slug, "update_body: unknown slug, ignoring");
                false
            }
        }
    }

    /// Create and register a fresh custom section, returning its slug
    pub fn create_custom(&mut self) -> String {
        let template = SectionTemplate::custom();
        let slug = template.slug.clone();
        self.templates.push(template);
        slug
    }

    /// Load user templates from a directory of *.md files.
    ///
    /// One file becomes one template: slug from the slugified file stem,
    /// display name from the first `# heading` in the body (title-cased
    /// stem when there is none). A user slug that matches an existing
    /// template overrides it. Returns the number of files loaded; a
    /// missing directory loads nothing.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            debug!(dir = %dir.display(), "templates directory does not exist, skipping");
            return Ok(0);
        }
        if !dir.is_dir() {
            return Err(ReadmeError::invalid_template(dir, "not a directory"));
        }

        let mut loaded = 0;
        for entry in walkdir::WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|s| s.to_str()) != Some("md")
                || path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .starts_with('.')
            {
                continue;
            }

            let markdown = match std::fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "unreadable template, skipping");
                    continue;
                }
            };

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let slug = slugify(stem);
            if slug.is_empty() {
                warn!(path = %path.display(), "file stem yields an empty slug, skipping");
                continue;
            }

            let name = HEADING_RE
                .captures(&markdown)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| title_case(&slug));

            self.upsert(SectionTemplate::new(slug, name, markdown));
            loaded += 1;
        }

        debug!(count = loaded, dir = %dir.display(), "loaded user templates");
        Ok(loaded)
    }
}
