//! Markdown renderer using pulldown-cmark.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Markdown to HTML renderer.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Render a markdown body to an HTML fragment.
    ///
    /// Headings without an explicit `{#id}` get one derived from their text.
    pub fn render(&self, body: &str) -> String {
        let mut events: Vec<Event<'_>> = Parser::new_ext(body, self.options).collect();
        assign_heading_ids(&mut events);

        let mut out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Give every heading lacking an id a unique slug of its text.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut i = 0;

    while i < events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            i += 1;
            continue;
        }

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() {
            match &events[end] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            end += 1;
        }

        let slug = slugify(&text);
        if !slug.is_empty() {
            let count = seen.entry(slug.clone()).or_insert(0);
            let unique = if *count == 0 {
                slug
            } else {
                format!("{slug}-{count}")
            };
            *count += 1;

            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(unique));
            }
        }

        i = end + 1;
    }
}

/// Convert text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_blocks() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is *markdown* with **formatting**.");

        assert!(html.contains("<h1 id=\"hello-world\">Hello World</h1>"));
        assert!(html.contains("<em>markdown</em>"));
        assert!(html.contains("<strong>formatting</strong>"));
        assert!(html.contains("<p>"));
    }

    #[test]
    fn test_render_lists_and_links() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- [Drippy](https://example.com)\n- second\n\n1. one\n2. two");

        assert!(html.contains("<ul>"));
        assert!(html.contains("<ol>"));
        assert!(html.contains("<a href=\"https://example.com\">Drippy</a>"));
    }

    #[test]
    fn test_render_code_block_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() { let a = 1 < 2; }\n```");

        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Notes\n\n## Notes\n\n## `code` Notes");

        assert!(html.contains("<h2 id=\"notes\">"));
        assert!(html.contains("<h2 id=\"notes-1\">"));
        assert!(html.contains("<h2 id=\"code-notes\">"));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Title {#custom}");

        assert!(html.contains("<h1 id=\"custom\">Title</h1>"));
    }

    #[test]
    fn test_table_rendering() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(
            "| Header 1 | Header 2 |
|----------|----------|
| Cell 1   | Cell 2   |",
        );

        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
        assert!(html.contains("<td>Cell 1</td>"));
    }

    #[test]
    fn test_task_list() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- [x] Done\n- [ ] Not done");

        assert!(html.contains("checkbox"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test 123 Post"), "test-123-post");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
    }
}
