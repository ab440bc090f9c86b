//! Regex-driven markdown subset renderer for documentation pages.
//!
//! This crate converts README-style markdown into an HTML fragment that is
//! embedded into a page template. It is a best-effort converter for a fixed
//! subset of markdown, not a `CommonMark` parser:
//!
//! - `#`, `##`, `###` headings (`#` is demoted to `<h2>` by default)
//! - `**strong**` and `*emphasis*`
//! - fenced code blocks and inline code
//! - `[label](url)` links
//! - `*`/`-` bullet lists and numbered lists that keep their start number
//! - blank-line separated paragraphs
//!
//! Rendering is a pure function of the input and never fails.
//!
//! # Example
//!
//! ```
//! use docpage_renderer::render;
//!
//! let html = render("## Features\n\n* fast\n* small\n");
//! assert_eq!(html, "<h2>Features</h2>\n\n<ul><li>fast</li>\n<li>small</li></ul>\n");
//! ```

mod lists;
mod renderer;

pub use renderer::{HeadingPolicy, SubsetRenderer, render};
