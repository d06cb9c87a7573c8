//! New command - scaffold an example project

use std::{fs, path::Path};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};
use drippy_core::config::CONFIG_FILE_NAME;

/// Directory created when no target is given.
pub const DEFAULT_DIR: &str = "drippy-example";

const HEAD_TEMPLATE: &str = r#"<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
"#;

const POST_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    {% include "head.liquid" %}
    <title>{{ title }}</title>
  </head>
  <body>
    <div class="post">
      <h1>{{ title }}</h1>
      <time>{{ date }}</time>
      <div class="post-content">
        {{ content }}
      </div>
    </div>
  </body>
</html>
"#;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    {% include "head.liquid" %}
    <title>My website</title>
  </head>
  <body>
    <h1>Hello World</h1>
    <ul>
      {% for post in posts %}
      <li><a href="{{ post.pathname }}">{{ post.title }}</a> {{ post.date }}</li>
      {% endfor %}
    </ul>
  </body>
</html>
"#;

/// Run the new command.
///
/// Creates an example project in `dir` with templates, an index page and two
/// posts, ready for `drippy build`.
pub fn run(dir: &Path) -> Result<()> {
    tracing::info!(?dir, "Creating example project");

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    let src = dir.join("src");
    let templates = src.join("templates");
    let pages = src.join("pages");
    let posts = pages.join("posts");

    for path in [&templates, &posts, &src.join("assets"), &dir.join("build")] {
        fs::create_dir_all(path)
            .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    }

    write(&templates.join("head.liquid"), HEAD_TEMPLATE)?;
    write(&templates.join("post.liquid"), POST_TEMPLATE)?;
    write(&pages.join("index.liquid"), INDEX_PAGE)?;

    let date = Utc::now().format("%Y-%m-%d").to_string();
    for (name, ordinal) in [("post-1", "first"), ("post-2", "second")] {
        write(&posts.join(format!("{name}.md")), &generate_post(ordinal, &date))?;
    }

    let config = serde_json::json!({
        "buildPath": "build",
        "sourcePath": "src",
        "pagesPath": "src/pages",
        "templatesPath": "src/templates",
    });
    write(&config_path, &serde_json::to_string_pretty(&config)?)?;

    tracing::info!(?dir, "Created example project");
    println!("Created: {}", dir.display());
    println!("Run `drippy --root {} build` to build it.", dir.display());

    Ok(())
}

fn generate_post(ordinal: &str, date: &str) -> String {
    format!(
        r#"---
title: My {ordinal} post
date: {date}
template: post
---

This is the content of my {ordinal} post.
"#
    )
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).wrap_err_with(|| format!("Failed to write {}", path.display()))
}
