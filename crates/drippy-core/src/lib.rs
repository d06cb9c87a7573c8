//! Drippy Core Library
//!
//! Core types, configuration, path resolution and frontmatter parsing for the
//! Drippy static site generator.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod paths;

pub use config::BuildConfig;
pub use content::{Bindings, Collection, Collections, SourceKind, Value};
pub use error::{CoreError, Result};
pub use frontmatter::{Frontmatter, ParseResult};
