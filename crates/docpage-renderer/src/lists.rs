//! Line-based list detection and block wrapping.
//!
//! A single forward pass over the document lines rewrites list markers to
//! `<li>` items and wraps runs of items in `<ul>` or `<ol start="N">` blocks.
//!
//! - `* item` and `- item` open (or continue) an unordered list
//! - `N. item` opens an ordered list starting at `N`; it continues only while
//!   each number is the successor of the previous one; a number too large
//!   for `u64` still opens a list but never continues one
//! - any other line closes the open list
//!
//! Closing tags are attached to the last item line, and a list that closes
//! only to be replaced by another list is written on the same line, so
//! `5. a\n7. b` renders as `<ol start="5"><li>a</li></ol><ol start="7"><li>b</li></ol>`.

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\. (.*)$").unwrap());

/// Classification of a single source line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// `* item` or `- item`.
    Bullet(&'a str),
    /// `N. item`. `start` is `N` without leading zeros; `number` is `None`
    /// when `N` does not fit in a `u64`.
    Numbered {
        number: Option<u64>,
        start: &'a str,
        content: &'a str,
    },
    /// Anything else, passed through unchanged.
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();

        if let Some(content) = trimmed
            .strip_prefix("* ")
            .or_else(|| trimmed.strip_prefix("- "))
        {
            return Self::Bullet(content);
        }

        if let Some(caps) = NUMBERED_ITEM.captures(trimmed)
            && let (Some(digits), Some(content)) = (caps.get(1), caps.get(2))
        {
            let digits = digits.as_str();
            let start = match digits.trim_start_matches('0') {
                "" => "0",
                significant => significant,
            };
            return Self::Numbered {
                number: start.parse().ok(),
                start,
                content: content.as_str(),
            };
        }

        Self::Text(line)
    }
}

/// Which list block is currently open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListState {
    Closed,
    Unordered,
    Ordered { last: Option<u64> },
}

impl ListState {
    fn closing_tag(self) -> Option<&'static str> {
        match self {
            Self::Closed => None,
            Self::Unordered => Some("</ul>"),
            Self::Ordered { .. } => Some("</ol>"),
        }
    }
}

/// Accumulates output lines while tracking the open list block.
struct ListWriter {
    lines: Vec<String>,
    state: ListState,
}

impl ListWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            state: ListState::Closed,
        }
    }

    fn bullet(&mut self, content: &str) {
        let item = format!("<li>{content}</li>");
        if self.state == ListState::Unordered {
            self.lines.push(item);
        } else {
            self.open("<ul>", &item, ListState::Unordered);
        }
    }

    fn numbered(&mut self, number: Option<u64>, start: &str, content: &str) {
        let item = format!("<li>{content}</li>");
        let continues = matches!(
            (self.state, number),
            (ListState::Ordered { last: Some(last) }, Some(number))
                if last.checked_add(1) == Some(number)
        );

        if continues {
            self.lines.push(item);
            self.state = ListState::Ordered { last: number };
        } else {
            let tag = format!(r#"<ol start="{start}">"#);
            self.open(&tag, &item, ListState::Ordered { last: number });
        }
    }

    fn text(&mut self, line: &str) {
        self.close();
        self.lines.push(line.to_owned());
    }

    /// Close whatever list is open, then open a new one with its first item.
    fn open(&mut self, tag: &str, item: &str, state: ListState) {
        let line = format!("{tag}{item}");
        if self.close()
            && let Some(last) = self.lines.last_mut()
        {
            last.push_str(&line);
        } else {
            self.lines.push(line);
        }
        self.state = state;
    }

    /// Append the closing tag of the open list to the last line.
    ///
    /// Returns `true` if a list was closed.
    fn close(&mut self) -> bool {
        let Some(tag) = self.state.closing_tag() else {
            return false;
        };
        self.state = ListState::Closed;
        match self.lines.last_mut() {
            Some(last) => last.push_str(tag),
            None => self.lines.push(tag.to_owned()),
        }
        true
    }

    fn finish(mut self) -> String {
        self.close();
        self.lines.join("\n")
    }
}

/// Rewrite list items and wrap them in list blocks.
pub(crate) fn wrap_lists(text: &str) -> String {
    let mut writer = ListWriter::with_capacity(text.len() / 32 + 1);

    for line in text.split('\n') {
        match Line::classify(line) {
            Line::Bullet(content) => writer.bullet(content),
            Line::Numbered {
                number,
                start,
                content,
            } => writer.numbered(number, start, content),
            Line::Text(line) => writer.text(line),
        }
    }

    writer.finish()
}
