//! Source-to-site path resolution.
//!
//! All functions are pure: they look only at the given path and the roots in
//! [`BuildConfig`], never at the filesystem or the working directory.

use std::path::{Component, Path, PathBuf};

use crate::{
    config::BuildConfig,
    content::SourceKind,
    error::{CoreError, Result},
};

/// Extension of every rendered page.
pub const OUTPUT_EXTENSION: &str = "html";

/// Path of `path` relative to the pages root.
pub fn relative(config: &BuildConfig, path: &Path) -> Result<PathBuf> {
    path.strip_prefix(&config.pages_path)
        .map(Path::to_path_buf)
        .map_err(|_| CoreError::outside_pages(path, &config.pages_path))
}

/// Site-relative URL path of `path`. The pages root itself is `/`.
pub fn pathname(config: &BuildConfig, path: &Path) -> Result<String> {
    let relative = relative(config, path)?;
    Ok(format!("/{}", url_segments(&relative)))
}

/// URL path of the page rendered from `source`, with its `.html` extension.
pub fn page_pathname(config: &BuildConfig, source: &Path) -> Result<String> {
    pathname(config, &with_output_extension(source))
}

/// Location under the build root where `source` is written.
pub fn output_path(config: &BuildConfig, source: &Path) -> Result<PathBuf> {
    let relative = relative(config, source)?;
    Ok(config.build_path.join(with_output_extension(&relative)))
}

/// Key under which the collection of `dir` is bound in index templates.
pub fn collection_key(config: &BuildConfig, dir: &Path) -> Result<String> {
    Ok(url_segments(&relative(config, dir)?))
}

/// Rewrite a trailing template or Markdown extension to `.html`.
pub fn with_output_extension(path: &Path) -> PathBuf {
    if SourceKind::from_path(path).is_some() {
        path.with_extension(OUTPUT_EXTENSION)
    } else {
        path.to_path_buf()
    }
}

fn url_segments(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
