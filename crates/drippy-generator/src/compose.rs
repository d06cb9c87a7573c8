//! Markdown page composition.
//!
//! A Markdown page names its template in frontmatter (`template: post`). The
//! body is converted to HTML and bound as `content` alongside the page's
//! frontmatter when that template is rendered.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use drippy_core::{BuildConfig, Frontmatter, Value, content::SourceKind};
use drippy_parser::MarkdownRenderer;
use thiserror::Error;
use tracing::debug;

use crate::template::{Renderer, TemplateError};

/// Frontmatter key naming the template of a Markdown page.
pub const TEMPLATE_KEY: &str = "template";

/// Binding that receives the converted Markdown body.
pub const CONTENT_KEY: &str = "content";

/// Markdown composition errors.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Markdown page has no `template` frontmatter key.
    #[error("template is missing from {path}")]
    MissingTemplateReference { path: PathBuf },

    /// Named template could not be read.
    #[error("cannot read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Rendering the named template failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for composition.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Composes Markdown bodies into named templates.
#[derive(Debug, Default)]
pub struct MarkdownCompositor {
    markdown: MarkdownRenderer,
}

impl MarkdownCompositor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the template named `name`.
    #[must_use]
    pub fn template_path(config: &BuildConfig, name: &str) -> PathBuf {
        config
            .templates_path
            .join(format!("{name}.{}", SourceKind::Template.extension()))
    }

    /// Convert `body`, render it into the page's template and write the page.
    pub fn compose_and_render(
        &self,
        renderer: &mut Renderer,
        config: &BuildConfig,
        source: &Path,
        body: &str,
        frontmatter: &Frontmatter,
    ) -> Result<PathBuf> {
        let name = frontmatter
            .get(TEMPLATE_KEY)
            .ok_or_else(|| ComposeError::MissingTemplateReference {
                path: source.to_path_buf(),
            })?;

        let template_path = Self::template_path(config, name);
        let template = fs::read_to_string(&template_path).map_err(|e| ComposeError::Io {
            path: template_path.clone(),
            source: e,
        })?;

        debug!(source = %source.display(), template = name, "composing markdown page");

        let mut bindings = frontmatter.to_bindings();
        bindings.insert(CONTENT_KEY.to_string(), Value::from(self.markdown.render(body)));

        Ok(renderer.render_to(config, source, &template, &bindings)?)
    }
}
