//! Command implementations for readmectl CLI

pub mod render;
pub mod sections;

// Re-export main dispatcher functions for flat access from main.rs
pub use render::run_render;
pub use sections::run_sections;
