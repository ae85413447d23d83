//! Rich-text rendering
//!
//! Converts a structured block sequence into HTML. The transformation is
//! deterministic: structurally identical input always yields the same
//! bytes. Block order is preserved; consecutive list items are grouped
//! into a single list element.

use super::document::{BlockKind, RichTextBlock, Span, SpanKind};
use crate::helpers::html::html_escape;

/// Flatten a block sequence into plain text, blocks joined by a space
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a block sequence into HTML markup
pub fn render_rich_content(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<BlockKind> = None;

    for block in blocks {
        let list_kind = match block.kind {
            BlockKind::ListItem | BlockKind::OrderedListItem => Some(block.kind),
            _ => None,
        };

        // close the current list when the block is not one of its items
        if open_list.is_some() && open_list != list_kind {
            html.push_str(list_close(open_list.unwrap()));
            html.push('\n');
            open_list = None;
        }

        if list_kind.is_some() && open_list.is_none() {
            html.push_str(list_open(list_kind.unwrap()));
            html.push('\n');
            open_list = list_kind;
        }

        let inline = render_inline(&block.text, &block.spans);
        let (open, close) = block_tags(block.kind);
        html.push_str(open);
        html.push_str(&inline);
        html.push_str(close);
        html.push('\n');
    }

    if let Some(kind) = open_list {
        html.push_str(list_close(kind));
        html.push('\n');
    }

    html
}

fn block_tags(kind: BlockKind) -> (&'static str, &'static str) {
    match kind {
        BlockKind::Paragraph => ("<p>", "</p>"),
        BlockKind::Heading1 => ("<h1>", "</h1>"),
        BlockKind::Heading2 => ("<h2>", "</h2>"),
        BlockKind::Heading3 => ("<h3>", "</h3>"),
        BlockKind::Heading4 => ("<h4>", "</h4>"),
        BlockKind::Heading5 => ("<h5>", "</h5>"),
        BlockKind::Heading6 => ("<h6>", "</h6>"),
        BlockKind::ListItem | BlockKind::OrderedListItem => ("<li>", "</li>"),
        BlockKind::Preformatted => ("<pre>", "</pre>"),
    }
}

fn list_open(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::OrderedListItem => "<ol>",
        _ => "<ul>",
    }
}

fn list_close(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::OrderedListItem => "</ol>",
        _ => "</ul>",
    }
}

/// Apply inline spans over the block text by character offsets.
///
/// Spans are applied in offset order; overlapping or empty ranges are
/// skipped. Text segments are HTML-escaped.
fn render_inline(text: &str, spans: &[Span]) -> String {
    if spans.is_empty() {
        return html_escape(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sorted: Vec<&Span> = spans.iter().collect();
    sorted.sort_by_key(|span| (span.start, span.end));

    let mut out = String::new();
    let mut pos = 0;

    for span in sorted {
        let start = span.start.min(chars.len());
        let end = span.end.min(chars.len());
        if start < pos || end <= start {
            continue;
        }

        out.push_str(&html_escape(&slice(&chars, pos, start)));
        let inner = html_escape(&slice(&chars, start, end));
        match &span.kind {
            SpanKind::Strong => {
                out.push_str("<strong>");
                out.push_str(&inner);
                out.push_str("</strong>");
            }
            SpanKind::Em => {
                out.push_str("<em>");
                out.push_str(&inner);
                out.push_str("</em>");
            }
            SpanKind::Hyperlink { data } => {
                out.push_str(&format!(
                    r#"<a href="{}">{}</a>"#,
                    html_escape(&data.url),
                    inner
                ));
            }
        }
        pos = end;
    }

    out.push_str(&html_escape(&slice(&chars, pos, chars.len())));
    out
}

fn slice(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}
