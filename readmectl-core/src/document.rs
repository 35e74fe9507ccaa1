//! Compose the final README from the selected sections.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::catalog::TemplateCatalog;
use crate::editor::SectionEditor;
use crate::error::Result;

/// Join the selected sections into one markdown document.
///
/// Bodies are trimmed of trailing whitespace and separated by exactly one
/// blank line; a non-empty document ends with a single newline. Selected
/// slugs the catalog cannot resolve are skipped, as are sections whose
/// body is all whitespace. An empty selection composes to the empty
/// string.
pub fn compose(editor: &SectionEditor, catalog: &TemplateCatalog) -> String {
    let mut out = String::new();
    for slug in editor.selected() {
        let Some(template) = catalog.get(slug) else {
            warn!(slug = %slug, "selected section has no template, skipping");
            continue;
        };
        let body = template.markdown.trim_end();
        if body.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(body);
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Write composed markdown to disk, creating parent directories as needed
pub fn write_markdown(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::SectionEditor;
    use crate::template::SectionTemplate;

    fn catalog() -> TemplateCatalog {
        let mut catalog = TemplateCatalog::empty();
        catalog.upsert(SectionTemplate::new("title", "Title", "# Hello\n\n\n"));
        catalog.upsert(SectionTemplate::new("usage", "Usage", "## Usage\n\nRun it.\n"));
        catalog.upsert(SectionTemplate::new("blank", "Blank", "   \n\n"));
        catalog
    }

    #[test]
    fn compose_joins_sections_with_one_blank_line() {
        let editor = SectionEditor::from_parts(
            vec![],
            vec!["title".into(), "usage".into()],
            None,
        );
        let markdown = compose(&editor, &catalog());
        assert_eq!(markdown, "# Hello\n\n## Usage\n\nRun it.\n");
    }

    #[test]
    fn compose_skips_unknown_and_blank_sections() {
        let editor = SectionEditor::from_parts(
            vec![],
            vec!["ghost".into(), "blank".into(), "usage".into()],
            None,
        );
        let markdown = compose(&editor, &catalog());
        assert_eq!(markdown, "## Usage\n\nRun it.\n");
    }

    #[test]
    fn compose_of_empty_selection_is_empty() {
        let editor = SectionEditor::from_parts(vec!["title".into()], vec![], None);
        assert_eq!(compose(&editor, &catalog()), "");
    }

    #[test]
    fn compose_follows_selected_order() {
        let editor = SectionEditor::from_parts(
            vec![],
            vec!["usage".into(), "title".into()],
            None,
        );
        let markdown = compose(&editor, &catalog());
        assert!(markdown.starts_with("## Usage"));
        assert!(markdown.ends_with("# Hello\n"));
    }

    #[test]
    fn write_markdown_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs/out/README.md");

        write_markdown(&path, "# Hi\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Hi\n");
    }
}
