//! Drippy Parser Library
//!
//! Converts Markdown page bodies into HTML fragments.

pub mod markdown;

pub use markdown::{MarkdownRenderer, slugify};
