//! Build configuration.
//!
//! A [`BuildConfig`] holds the four absolute roots every path computation is
//! relative to. It is loaded once from the project root (built-in defaults,
//! then an optional `drippy.json`, then `DRIPPY_*` environment variables) and
//! passed by reference to every component that needs it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Name of the optional configuration file in the project root.
pub const CONFIG_FILE_NAME: &str = "drippy.json";

/// Environment variable prefix for overrides (e.g. `DRIPPY_BUILD_PATH`).
pub const ENV_PREFIX: &str = "DRIPPY";

/// Resolved build configuration. Every path is absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Root of the generated site.
    pub build_path: PathBuf,

    /// Directory holding named templates for Markdown pages and includes.
    pub templates_path: PathBuf,

    /// Source root, used as a fallback when resolving includes.
    pub source_path: PathBuf,

    /// Pages root. Each direct sub-directory is a collection.
    pub pages_path: PathBuf,

    /// Whether to minify HTML output.
    pub minify: bool,
}

/// Shape of `drippy.json` and the environment overrides.
///
/// Environment keys are converted to the file's camelCase, so
/// `DRIPPY_BUILD_PATH` and `"buildPath"` name the same value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    build_path: Option<PathBuf>,

    #[serde(default)]
    templates_path: Option<PathBuf>,

    #[serde(default)]
    source_path: Option<PathBuf>,

    #[serde(default)]
    pages_path: Option<PathBuf>,

    #[serde(default)]
    minify: Option<bool>,
}

// Default value functions
fn default_build_path() -> PathBuf {
    PathBuf::from("build")
}

fn default_templates_path() -> PathBuf {
    Path::new("src").join("templates")
}

fn default_source_path() -> PathBuf {
    PathBuf::from("src")
}

fn default_pages_path() -> PathBuf {
    Path::new("src").join("pages")
}

impl BuildConfig {
    /// Built-in defaults resolved against `root`.
    pub fn with_root(root: &Path) -> Result<Self> {
        let root = absolute_root(root)?;
        Ok(Self::from_file(&root, ConfigFile::default()))
    }

    /// Load configuration for the project rooted at `root`.
    ///
    /// Values from `drippy.json` (if present) and `DRIPPY_*` environment
    /// variables override the built-in defaults. Relative paths are resolved
    /// against `root`.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_with_env(root, environment())
    }

    fn load_with_env(root: &Path, env: config::Environment) -> Result<Self> {
        let root = absolute_root(root)?;
        let file_path = root.join(CONFIG_FILE_NAME);

        if !file_path.exists() {
            tracing::debug!(path = %file_path.display(), "no config file, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(file_path.as_path()).required(false))
            .add_source(env)
            .build()?;

        let file: ConfigFile = settings.try_deserialize().map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", file_path.display()),
                e,
            )
        })?;

        let config = Self::from_file(&root, file);
        config.validate()?;
        Ok(config)
    }

    fn from_file(root: &Path, file: ConfigFile) -> Self {
        let resolve = |path: Option<PathBuf>, default: fn() -> PathBuf| {
            let path = path.unwrap_or_else(default);
            if path.is_absolute() {
                path
            } else {
                root.join(path)
            }
        };

        Self {
            build_path: resolve(file.build_path, default_build_path),
            templates_path: resolve(file.templates_path, default_templates_path),
            source_path: resolve(file.source_path, default_source_path),
            pages_path: resolve(file.pages_path, default_pages_path),
            minify: file.minify.unwrap_or(false),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.build_path == self.pages_path || self.build_path == self.source_path {
            return Err(CoreError::config(format!(
                "buildPath {} must differ from sourcePath and pagesPath",
                self.build_path.display()
            )));
        }

        if !self.pages_path.starts_with(&self.source_path) {
            tracing::warn!(
                pages = %self.pages_path.display(),
                source = %self.source_path.display(),
                "pagesPath is not inside sourcePath"
            );
        }

        Ok(())
    }
}

/// `DRIPPY_*` variables, with `_` between words mapped to camelCase keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .convert_case(config::Case::Camel)
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    std::path::absolute(root).map_err(|e| CoreError::io(root, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let config = BuildConfig::load(dir.path()).expect("load config");

        assert_eq!(config.build_path, dir.path().join("build"));
        assert_eq!(config.templates_path, dir.path().join("src/templates"));
        assert_eq!(config.source_path, dir.path().join("src"));
        assert_eq!(config.pages_path, dir.path().join("src/pages"));
        assert!(!config.minify);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "buildPath": "dist", "pagesPath": "content/pages", "minify": true }"#,
        )
        .expect("write");

        let config = BuildConfig::load(dir.path()).expect("load config");

        assert_eq!(config.build_path, dir.path().join("dist"));
        assert_eq!(config.pages_path, dir.path().join("content/pages"));
        // Untouched keys keep their defaults.
        assert_eq!(config.templates_path, dir.path().join("src/templates"));
        assert!(config.minify);
    }

    #[test]
    fn test_absolute_paths_kept() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let elsewhere = tempfile::tempdir().expect("create temp dir");
        let json = serde_json::json!({ "buildPath": elsewhere.path() });
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), json.to_string()).expect("write");

        let config = BuildConfig::load(dir.path()).expect("load config");

        assert_eq!(config.build_path, elsewhere.path());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").expect("write");

        let result = BuildConfig::load(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_build_path_must_differ_from_pages() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "buildPath": "src/pages" }"#,
        )
        .expect("write");

        let result = BuildConfig::load(dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must differ"));
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        environment().source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_env_overrides_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let config = BuildConfig::load_with_env(
            dir.path(),
            env(&[("DRIPPY_PAGES_PATH", "content"), ("DRIPPY_MINIFY", "true")]),
        )
        .expect("load config");

        assert_eq!(config.pages_path, dir.path().join("content"));
        assert_eq!(config.build_path, dir.path().join("build"));
        assert!(config.minify);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "buildPath": "dist", "templatesPath": "layouts" }"#,
        )
        .expect("write");

        let config =
            BuildConfig::load_with_env(dir.path(), env(&[("DRIPPY_BUILD_PATH", "out")]))
                .expect("load config");

        assert_eq!(config.build_path, dir.path().join("out"));
        assert_eq!(config.templates_path, dir.path().join("layouts"));
    }

    #[test]
    fn test_with_root_is_absolute() {
        let config = BuildConfig::with_root(Path::new("site")).expect("config");
        assert!(config.build_path.is_absolute());
        assert!(config.pages_path.ends_with("site/src/pages"));
    }
}
