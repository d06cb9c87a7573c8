//! Build orchestration.
//!
//! A build has two passes. The collect pass renders every page of every
//! direct sub-directory of the pages root. The index pass then renders the
//! root's `index.liquid` and each sub-directory's `index.liquid`, with all
//! collections bound by directory name so any index can list any collection.
//! The same collections are also bound as one map under `collections`, which
//! reaches directories like `blog-posts` whose names are not identifiers.
//! The first error aborts the build.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use drippy_core::{
    Bindings, BuildConfig, Collections, CoreError, Value, content::INDEX_TEMPLATE, paths,
};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    collector::{CollectionBuilder, CollectorError, PATHNAME_KEY},
    template::{Renderer, TemplateError},
};

/// Binding holding every collection, for keys that are not identifiers.
pub const COLLECTIONS_KEY: &str = "collections";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listing the pages root failed.
    #[error("cannot list pages directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Path resolution error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Index template error.
    #[error("index error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of collection pages generated.
    pub pages: usize,

    /// Number of collections built.
    pub collections: usize,

    /// Number of index pages generated.
    pub indexes: usize,

    /// Number of writes that replaced an earlier page of the same build.
    pub collisions: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: BuildConfig,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            pages = %self.config.pages_path.display(),
            output = %self.config.build_path.display(),
            "starting build"
        );

        let mut renderer = Renderer::new(&self.config);
        let dirs = self.collection_dirs()?;

        // 1. Collect every sub-directory before any index is rendered
        let collector = CollectionBuilder::new(&self.config);
        let mut collections = Collections::new();
        for dir in &dirs {
            let collection = collector.build(&mut renderer, dir)?;
            stats.pages += collection.len();
            collections.insert(paths::collection_key(&self.config, dir)?, collection);
        }
        stats.collections = collections.len();

        // 2. Render the root index, then each collection's index
        let roots = std::iter::once(self.config.pages_path.as_path())
            .chain(dirs.iter().map(PathBuf::as_path));
        for dir in roots {
            if self.render_index(&mut renderer, dir, &collections)? {
                stats.indexes += 1;
            }
        }

        stats.collisions = renderer.collisions();
        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            pages = stats.pages,
            collections = stats.collections,
            indexes = stats.indexes,
            collisions = stats.collisions,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Direct sub-directories of the pages root, in file-name order.
    fn collection_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in WalkDir::new(&self.config.pages_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        Ok(dirs)
    }

    /// Render `dir`'s index template, if it has one.
    fn render_index(
        &self,
        renderer: &mut Renderer,
        dir: &Path,
        collections: &Collections,
    ) -> Result<bool> {
        let index = dir.join(INDEX_TEMPLATE);
        if !index.is_file() {
            debug!(dir = %dir.display(), "no index template");
            return Ok(false);
        }

        let template = fs::read_to_string(&index).map_err(|e| BuildError::Io {
            path: index.clone(),
            source: e,
        })?;

        let by_key: Bindings = collections
            .iter()
            .map(|(key, collection)| (key.clone(), Value::from(collection.clone())))
            .collect();
        let mut bindings = by_key.clone();
        bindings.insert(COLLECTIONS_KEY.to_string(), Value::from(by_key));
        bindings.insert(
            PATHNAME_KEY.to_string(),
            Value::from(paths::pathname(&self.config, dir)?),
        );

        renderer.render_to(&self.config, &index, &template, &bindings)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn site() -> (TempDir, BuildConfig) {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::with_root(dir.path()).unwrap();
        fs::create_dir_all(&config.pages_path).unwrap();
        fs::create_dir_all(&config.templates_path).unwrap();
        (dir, config)
    }

    #[test]
    fn test_build_empty_site() {
        let (_dir, config) = site();

        let stats = Builder::new(config).build().unwrap();

        assert_eq!(stats.pages, 0);
        assert_eq!(stats.collections, 0);
        assert_eq!(stats.indexes, 0);
    }

    #[test]
    fn test_root_index_sees_pathname() {
        let (_dir, config) = site();
        fs::write(
            config.pages_path.join("index.liquid"),
            "<p>{{ pathname }}</p>",
        )
        .unwrap();

        let stats = Builder::new(config.clone()).build().unwrap();

        assert_eq!(stats.indexes, 1);
        assert_eq!(
            fs::read_to_string(config.build_path.join("index.html")).unwrap(),
            "<p>/</p>"
        );
    }

    #[test]
    fn test_collection_index_sees_other_collections() {
        let (_dir, config) = site();
        for name in ["news", "posts"] {
            fs::create_dir_all(config.pages_path.join(name)).unwrap();
        }
        fs::write(
            config.pages_path.join("news/today.liquid"),
            "---\ntitle: Today\n---\nnews",
        )
        .unwrap();
        fs::write(
            config.pages_path.join("posts/index.liquid"),
            "{{ pathname }}:{% for n in news %}{{ n.title }}@{{ n.pathname }}{% endfor %}",
        )
        .unwrap();

        let stats = Builder::new(config.clone()).build().unwrap();

        assert_eq!(stats.pages, 1);
        assert_eq!(stats.collections, 2);
        assert_eq!(stats.indexes, 1);
        assert_eq!(
            fs::read_to_string(config.build_path.join("posts/index.html")).unwrap(),
            "/posts:Today@/news/today.html"
        );
    }

    #[test]
    fn test_hyphenated_collection_reachable_through_map() {
        let (_dir, config) = site();
        fs::create_dir_all(config.pages_path.join("blog-posts")).unwrap();
        fs::write(
            config.pages_path.join("blog-posts/a.liquid"),
            "---\ntitle: A\n---\na",
        )
        .unwrap();
        fs::write(
            config.pages_path.join("index.liquid"),
            "{% for p in collections[\"blog-posts\"] %}{{ p.title }}@{{ p.pathname }}{% endfor %}",
        )
        .unwrap();

        let stats = Builder::new(config.clone()).build().unwrap();

        assert_eq!(stats.indexes, 1);
        assert_eq!(
            fs::read_to_string(config.build_path.join("index.html")).unwrap(),
            "A@/blog-posts/a.html"
        );
    }

    #[test]
    fn test_root_level_pages_are_not_collected() {
        let (_dir, config) = site();
        fs::write(config.pages_path.join("about.liquid"), "about").unwrap();

        let stats = Builder::new(config.clone()).build().unwrap();

        assert_eq!(stats.pages, 0);
        assert!(!config.build_path.join("about.html").exists());
    }

    #[test]
    fn test_missing_pages_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::with_root(dir.path()).unwrap();

        let err = Builder::new(config).build().unwrap_err();

        assert!(matches!(err, BuildError::Walk(_)));
    }

    #[test]
    fn test_index_syntax_error_aborts() {
        let (_dir, config) = site();
        fs::write(config.pages_path.join("index.liquid"), "{% for x in y %}").unwrap();

        let err = Builder::new(config.clone()).build().unwrap_err();

        assert!(matches!(err, BuildError::Template(TemplateError::Syntax(_))));
        assert!(!config.build_path.join("index.html").exists());
    }
}
