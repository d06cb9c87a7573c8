//! Drippy Generator Library
//!
//! Static site generation engine for Drippy.
//!
//! # Modules
//!
//! - [`template`] - Template rendering and page output
//! - [`format`] - HTML post-processing before pages are written
//! - [`compose`] - Markdown pages composed into named templates
//! - [`collector`] - Per-directory collection building
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod compose;
pub mod format;
pub mod template;

pub use build::{BuildError, BuildStats, Builder};
pub use collector::{CollectionBuilder, CollectorError};
pub use compose::{ComposeError, MarkdownCompositor};
pub use format::{HtmlFormatter, Minify, Passthrough};
pub use template::{Renderer, TemplateError};
