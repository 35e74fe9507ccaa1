pub mod catalog;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod session;
pub mod template;

pub use catalog::TemplateCatalog;
pub use config::ReadmectlConfig;
pub use document::{compose, write_markdown};
pub use editor::{EditorOp, SectionEditor};
pub use error::{ReadmeError, Result};
pub use session::{SessionState, SESSION_VERSION};
pub use template::{builtin_templates, slugify, SectionTemplate, DEFAULT_SELECTED};
