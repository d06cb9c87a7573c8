//! Collection building.
//!
//! A collection is one pages sub-directory: every non-index page in it is
//! rendered, and its frontmatter (plus `pathname`) becomes a record that
//! index templates can enumerate.

use std::{
    fs,
    path::{Path, PathBuf},
};

use drippy_core::{
    BuildConfig, Collection, CoreError, Frontmatter, SourceKind, content::INDEX_PREFIX,
    frontmatter, paths,
};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    compose::{ComposeError, MarkdownCompositor},
    template::{Renderer, TemplateError},
};

/// Frontmatter key holding a page's URL path.
pub const PATHNAME_KEY: &str = "pathname";

/// File written next to each collection's pages for inspection.
pub const DEBUG_RECORD_FILE: &str = "frontmatter.json";

/// Collection building errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Directory listing failed.
    #[error("cannot list directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading a page or resolving its paths failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Rendering a template page failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Composing a Markdown page failed.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// Writing the debug record failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the debug record failed.
    #[error("cannot serialize collection: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Builds the collection of a single pages sub-directory.
#[derive(Debug)]
pub struct CollectionBuilder<'a> {
    config: &'a BuildConfig,
    compositor: MarkdownCompositor,
}

impl<'a> CollectionBuilder<'a> {
    /// Create a new collection builder.
    #[must_use]
    pub fn new(config: &'a BuildConfig) -> Self {
        Self {
            config,
            compositor: MarkdownCompositor::new(),
        }
    }

    /// Render every page directly inside `dir` and return their records.
    ///
    /// Entries are visited in file-name order. Sub-directories, files whose
    /// name starts with `index` and files that are neither templates nor
    /// Markdown are skipped.
    pub fn build(&self, renderer: &mut Renderer, dir: &Path) -> Result<Collection> {
        info!(dir = %dir.display(), "building collection");

        let mut collection = Collection::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            if entry.file_name().to_string_lossy().starts_with(INDEX_PREFIX) {
                continue;
            }

            let path = entry.path();
            let Some(kind) = SourceKind::from_path(path) else {
                debug!(path = %path.display(), "skipping non-page file");
                continue;
            };

            collection.push(self.build_page(renderer, path, kind)?);
        }

        self.write_debug_record(dir, &collection)?;

        info!(dir = %dir.display(), pages = collection.len(), "collection complete");
        Ok(collection)
    }

    fn build_page(
        &self,
        renderer: &mut Renderer,
        path: &Path,
        kind: SourceKind,
    ) -> Result<Frontmatter> {
        let parsed = frontmatter::parse(path)?;

        let mut record = parsed.frontmatter;
        record.insert(PATHNAME_KEY, paths::page_pathname(self.config, path)?);

        match kind {
            SourceKind::Template => {
                renderer.render_to(self.config, path, &parsed.content, &record.to_bindings())?;
            }
            SourceKind::Markdown => {
                self.compositor.compose_and_render(
                    renderer,
                    self.config,
                    path,
                    &parsed.content,
                    &record,
                )?;
            }
        }

        Ok(record)
    }

    /// Write the collection as JSON under the directory's build output.
    fn write_debug_record(&self, dir: &Path, collection: &Collection) -> Result<()> {
        let out_dir = self.config.build_path.join(paths::relative(self.config, dir)?);
        fs::create_dir_all(&out_dir).map_err(|e| CollectorError::Io {
            path: out_dir.clone(),
            source: e,
        })?;

        let path = out_dir.join(DEBUG_RECORD_FILE);
        let json = serde_json::to_string_pretty(collection)?;
        fs::write(&path, json).map_err(|e| CollectorError::Io {
            path: path.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), "wrote collection record");
        Ok(())
    }
}
