//! Markdown subset renderer.
//!
//! Converts a markdown document to an HTML fragment through a fixed sequence
//! of text rewrites. Order matters: inline rewrites run first, then list
//! wrapping, then paragraph wrapping, so that list blocks already start with
//! a tag by the time paragraphs are wrapped.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::lists::wrap_lists;

static H3_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());

static STRONG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static EM_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());

static FENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap());
static INLINE_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// How `# heading` lines are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadingPolicy {
    /// `#` renders as `<h2>`, leaving `<h1>` to the surrounding page.
    #[default]
    DemoteTitle,
    /// `#` renders as `<h1>`.
    KeepTitle,
}

/// Regex-driven markdown subset renderer.
///
/// Supports headings (`#` to `###`), `**strong**`, `*emphasis*`, fenced and
/// inline code, `[links](url)`, `*`/`-` bullet lists, numbered lists and
/// paragraphs. Rendering never fails: input that matches no rule passes
/// through unchanged.
///
/// The renderer holds no per-document state and can be shared freely
/// between threads.
///
/// # Example
///
/// ```
/// use docpage_renderer::SubsetRenderer;
///
/// let html = SubsetRenderer::new().render("# Install\n\nRun **make**.");
/// assert_eq!(html, "<h2>Install</h2>\n\n<p>Run <strong>make</strong>.</p>");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SubsetRenderer {
    headings: HeadingPolicy,
}

impl SubsetRenderer {
    /// Create a renderer that demotes `#` headings to `<h2>`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headings: HeadingPolicy::DemoteTitle,
        }
    }

    /// Set how `#` headings are rendered.
    #[must_use]
    pub const fn with_heading_policy(mut self, policy: HeadingPolicy) -> Self {
        self.headings = policy;
        self
    }

    /// Current heading policy.
    #[must_use]
    pub const fn heading_policy(&self) -> HeadingPolicy {
        self.headings
    }

    /// Render a markdown document to an HTML fragment.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let text = self.render_headings(markdown);
        let text = render_emphasis(text);
        let text = render_code(text);
        let text = replace_all(&LINK_PATTERN, text, r#"<a href="${2}">${1}</a>"#);
        let text = wrap_lists(&text);
        wrap_paragraphs(&text)
    }

    fn render_headings(&self, markdown: &str) -> String {
        let title = match self.headings {
            HeadingPolicy::DemoteTitle => "<h2>${1}</h2>",
            HeadingPolicy::KeepTitle => "<h1>${1}</h1>",
        };
        let text = replace_all(&H3_PATTERN, markdown.to_owned(), "<h3>${1}</h3>");
        let text = replace_all(&H2_PATTERN, text, "<h2>${1}</h2>");
        replace_all(&H1_PATTERN, text, title)
    }
}

/// Render a documentation page fragment with the default heading policy.
///
/// Shorthand for `SubsetRenderer::new().render(markdown)`.
#[must_use]
pub fn render(markdown: &str) -> String {
    SubsetRenderer::new().render(markdown)
}

/// Strong runs before emphasis so `**` pairs are consumed first.
fn render_emphasis(text: String) -> String {
    let text = replace_all(&STRONG_PATTERN, text, "<strong>${1}</strong>");
    replace_all(&EM_PATTERN, text, "<em>${1}</em>")
}

/// Fenced blocks run before inline code; the fence language tag is dropped.
fn render_code(text: String) -> String {
    let text = replace_all(&FENCE_PATTERN, text, "<pre><code>${2}</code></pre>");
    replace_all(&INLINE_CODE_PATTERN, text, "<code>${1}</code>")
}

/// Wrap blank-line separated blocks in `<p>` unless they start with a tag.
///
/// Newlines around a block's content stay outside the `<p>` so the blank
/// lines of the input survive.
fn wrap_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(|block| {
            let content = block.trim_matches('\n');
            if content.trim().is_empty() || content.starts_with('<') {
                Cow::Borrowed(block)
            } else {
                let leading = &block[..block.len() - block.trim_start_matches('\n').len()];
                let trailing = &block[block.trim_end_matches('\n').len()..];
                Cow::Owned(format!("{leading}<p>{content}</p>{trailing}"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Apply a replacement, reusing the input buffer when nothing matched.
fn replace_all(pattern: &Regex, text: String, replacement: &str) -> String {
    match pattern.replace_all(&text, replacement) {
        Cow::Borrowed(_) => text,
        Cow::Owned(replaced) => replaced,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_levels() {
        let renderer = SubsetRenderer::new();
        assert_eq!(renderer.render("### Three"), "<h3>Three</h3>");
        assert_eq!(renderer.render("## Two"), "<h2>Two</h2>");
        assert_eq!(renderer.render("# One"), "<h2>One</h2>");
    }

    #[test]
    fn test_keep_title_heading() {
        let renderer = SubsetRenderer::new().with_heading_policy(HeadingPolicy::KeepTitle);
        assert_eq!(renderer.heading_policy(), HeadingPolicy::KeepTitle);
        assert_eq!(renderer.render("# One"), "<h1>One</h1>");
        assert_eq!(renderer.render("## Two"), "<h2>Two</h2>");
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(render("#hashtag"), "<p>#hashtag</p>");
        assert_eq!(render("####"), "<p>####</p>");
    }

    #[test]
    fn test_heading_only_at_line_start() {
        assert_eq!(render("see # note"), "<p>see # note</p>");
    }

    #[test]
    fn test_deeper_headings_are_text() {
        assert_eq!(render("#### Four"), "<p>#### Four</p>");
    }

    #[test]
    fn test_strong_before_emphasis() {
        assert_eq!(
            render("say **bold** and *italic*"),
            "<p>say <strong>bold</strong> and <em>italic</em></p>"
        );
    }

    #[test]
    fn test_block_starting_with_inline_tag_not_wrapped() {
        assert_eq!(render("**Note:** read"), "<strong>Note:</strong> read");
    }

    #[test]
    fn test_emphasis_does_not_cross_lines() {
        assert_eq!(render("*a\nb*"), "<p>*a\nb*</p>");
    }

    #[test]
    fn test_fenced_code_drops_language() {
        assert_eq!(
            render("```rust\nfn main() {}\n```"),
            "<pre><code>fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_without_language() {
        assert_eq!(
            render("```\nmake build\n```"),
            "<pre><code>make build\n</code></pre>"
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            render("run `cargo test` now"),
            "<p>run <code>cargo test</code> now</p>"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("see [docs](https://example.com/docs)"),
            r#"<p>see <a href="https://example.com/docs">docs</a></p>"#
        );
    }

    #[test]
    fn test_link_requires_label_and_url() {
        assert_eq!(render("[](x) and [y]()"), "<p>[](x) and [y]()</p>");
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(render("Hello\n\nWorld"), "<p>Hello</p>\n\n<p>World</p>");
    }

    #[test]
    fn test_paragraph_keeps_inner_newlines() {
        assert_eq!(render("one\ntwo\n\nthree"), "<p>one\ntwo</p>\n\n<p>three</p>");
    }

    #[test]
    fn test_tagged_blocks_not_wrapped() {
        assert_eq!(
            render("## Title\n\ntext\n\n* item"),
            "<h2>Title</h2>\n\n<p>text</p>\n\n<ul><li>item</li></ul>"
        );
    }

    #[test]
    fn test_blank_blocks_untouched() {
        assert_eq!(render("a\n\n\n\nb"), "<p>a</p>\n\n\n\n<p>b</p>");
    }

    #[test]
    fn test_odd_blank_lines_preserved() {
        assert_eq!(render("a\n\n\nb"), "<p>a</p>\n\n\n<p>b</p>");
        assert_eq!(render("a\n\n\n\n\nb"), "<p>a</p>\n\n\n\n\n<p>b</p>");
    }

    #[test]
    fn test_trailing_newline_outside_paragraph() {
        assert_eq!(render("Hello\n\nWorld\n"), "<p>Hello</p>\n\n<p>World</p>\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_replace_all_without_match_returns_input() {
        let text = "nothing here".to_owned();
        assert_eq!(replace_all(&LINK_PATTERN, text, "x"), "nothing here");
    }
}
