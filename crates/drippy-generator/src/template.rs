//! Template rendering and page output.
//!
//! Templates use Jinja-style syntax (`{{ var }}`, `{% if %}`, `{% for %}`,
//! `{% include "name" %}`) rendered by minijinja. Unbound variables, and
//! attributes of unbound variables, render as the empty string. Values are
//! inserted without HTML escaping.
//!
//! Include names are relative to the templates directory, then the source
//! directory, never the project root: write `{% include "head.liquid" %}`,
//! not `{% include "src/templates/head.liquid" %}`.
//!
//! Names that are not identifiers, such as a `blog-posts` collection, are
//! reached through a map binding: `{% for p in collections["blog-posts"] %}`.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use drippy_core::{Bindings, BuildConfig, CoreError, paths};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use thiserror::Error;
use tracing::{debug, warn};

use crate::format::{HtmlFormatter, formatter_for};

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Malformed template structure, such as an unclosed block.
    #[error("template syntax error: {0}")]
    Syntax(#[source] minijinja::Error),

    /// Any other failure raised while rendering.
    #[error("template render error: {0}")]
    Render(#[source] minijinja::Error),

    /// Writing the rendered page failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output path could not be resolved.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl TemplateError {
    fn from_engine(err: minijinja::Error) -> Self {
        match err.kind() {
            ErrorKind::SyntaxError => Self::Syntax(err),
            _ => Self::Render(err),
        }
    }

    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Renders templates and writes pages under the build root.
///
/// One renderer lives for a whole build and remembers every path it wrote.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
    formatter: Box<dyn HtmlFormatter>,
    written: HashSet<PathBuf>,
    collisions: usize,
}

impl Renderer {
    /// Create a renderer for `config`.
    ///
    /// Includes are looked up in the templates directory, then the source
    /// directory.
    #[must_use]
    pub fn new(config: &BuildConfig) -> Self {
        Self::with_formatter(config, formatter_for(config))
    }

    /// Create a renderer with an explicit formatter.
    #[must_use]
    pub fn with_formatter(config: &BuildConfig, formatter: Box<dyn HtmlFormatter>) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        let roots = vec![config.templates_path.clone(), config.source_path.clone()];
        env.set_loader(move |name| load_include(&roots, name));

        Self {
            env,
            formatter,
            written: HashSet::new(),
            collisions: 0,
        }
    }

    /// Render `template` against `bindings`.
    pub fn render(&self, template: &str, bindings: &Bindings) -> Result<String> {
        self.env
            .render_str(template, bindings)
            .map_err(TemplateError::from_engine)
    }

    /// Render `template` for `source` and write the page to its output path.
    ///
    /// Missing output directories are created. Nothing is written if
    /// rendering fails. Returns the written path.
    pub fn render_to(
        &mut self,
        config: &BuildConfig,
        source: &Path,
        template: &str,
        bindings: &Bindings,
    ) -> Result<PathBuf> {
        let output = paths::output_path(config, source)?;

        let html = self
            .env
            .render_named_str(&source.to_string_lossy(), template, bindings)
            .map_err(TemplateError::from_engine)?;
        let html = self.formatter.format(html);

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| TemplateError::io(parent, e))?;
        }
        fs::write(&output, html).map_err(|e| TemplateError::io(&output, e))?;

        if !self.written.insert(output.clone()) {
            self.collisions += 1;
            warn!(
                path = %output.display(),
                source = %source.display(),
                "output written more than once in this build, keeping the last write"
            );
        }

        debug!(source = %source.display(), output = %output.display(), "wrote page");
        Ok(output)
    }

    /// Number of writes that replaced a page written earlier in this build.
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

fn load_include(
    roots: &[PathBuf],
    name: &str,
) -> std::result::Result<Option<String>, minijinja::Error> {
    for root in roots {
        let path = root.join(name);
        match fs::read_to_string(&path) {
            Ok(source) => return Ok(Some(source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template {}", path.display()),
                )
                .with_source(e));
            }
        }
    }
    Ok(None)
}
