//! Greedy word wrapping for generated doc comments.
//!
//! Doc comments are assembled from a mix of plain text and Go identifiers.
//! Identifiers are resolved to their display text first (usually
//! `pkg.Name`, which may register an import), then the whole thing is
//! re-flowed into `// `-prefixed lines no wider than the column budget.

use crate::schema::GoIdent;

/// Default column budget for wrapped comment text, excluding the `// ` marker.
pub const COMMENT_WIDTH: usize = 97;

/// Marker placed in front of every wrapped line.
pub const COMMENT_MARKER: &str = "//";

/// One piece of a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentFragment {
    Text(String),
    Ident(GoIdent),
}

impl From<&str> for CommentFragment {
    fn from(text: &str) -> Self {
        CommentFragment::Text(text.to_string())
    }
}

impl From<String> for CommentFragment {
    fn from(text: String) -> Self {
        CommentFragment::Text(text)
    }
}

impl From<&String> for CommentFragment {
    fn from(text: &String) -> Self {
        CommentFragment::Text(text.clone())
    }
}

impl From<GoIdent> for CommentFragment {
    fn from(ident: GoIdent) -> Self {
        CommentFragment::Ident(ident)
    }
}

/// Flatten fragments into one string, resolving identifiers with `resolve`.
pub fn resolve_fragments<F>(fragments: &[CommentFragment], mut resolve: F) -> String
where
    F: FnMut(&GoIdent) -> String,
{
    let mut text = String::new();
    for fragment in fragments {
        match fragment {
            CommentFragment::Text(s) => text.push_str(s),
            CommentFragment::Ident(ident) => text.push_str(&resolve(ident)),
        }
    }
    text
}

/// Re-flow `text` into comment lines of at most `width` chars each.
///
/// Whitespace runs collapse to single spaces. A word that does not fit
/// starts a new line, unless it is the first word on the line: an over-wide
/// word sits alone on its own line and is never split. Empty or blank input
/// yields no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut pos = 0usize;
    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if pos > 0 && pos + 1 + word_width > width {
            lines.push(format!("{COMMENT_MARKER} {line}"));
            line.clear();
            pos = 0;
        }
        if pos > 0 {
            line.push(' ');
            pos += 1;
        }
        line.push_str(word);
        pos += word_width;
    }
    if !line.is_empty() {
        lines.push(format!("{COMMENT_MARKER} {line}"));
    }
    lines
}

/// Resolve and wrap a fragment sequence in one step.
pub fn wrap_comment<F>(fragments: &[CommentFragment], width: usize, resolve: F) -> Vec<String>
where
    F: FnMut(&GoIdent) -> String,
{
    wrap_text(&resolve_fragments(fragments, resolve), width)
}
