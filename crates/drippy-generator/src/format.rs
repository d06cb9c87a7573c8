//! HTML post-processing.
//!
//! Rendered pages pass through an [`HtmlFormatter`] right before they are
//! written. The default is the identity.

use std::fmt;

use drippy_core::BuildConfig;

/// Rewrites rendered HTML before it is written.
pub trait HtmlFormatter: fmt::Debug {
    fn format(&self, html: String) -> String;
}

/// Leaves HTML untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl HtmlFormatter for Passthrough {
    fn format(&self, html: String) -> String {
        html
    }
}

/// Minifies HTML with `minify-html`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minify;

impl HtmlFormatter for Minify {
    fn format(&self, html: String) -> String {
        let mut cfg = minify_html::Cfg::new();
        cfg.keep_closing_tags = true;
        cfg.keep_html_and_head_opening_tags = true;
        let minified = minify_html::minify(html.as_bytes(), &cfg);
        String::from_utf8_lossy(&minified).into_owned()
    }
}

/// Pick the formatter selected by the configuration.
pub fn formatter_for(config: &BuildConfig) -> Box<dyn HtmlFormatter> {
    if config.minify {
        Box::new(Minify)
    } else {
        Box::new(Passthrough)
    }
}
