//! Content models and mapping
//!
//! Raw documents arrive from the content repository in its own wire
//! shape; view models carry only what the pages render. The raw shape is
//! never handed to a template directly.

mod document;
mod post;
pub mod richtext;

pub use document::{
    BlockKind, LinkData, RawBanner, RawData, RawDocument, RawSection, RichTextBlock, Span, SpanKind,
};
pub use post::{ContentSection, PostDetail, PostSummary};

/// The document type used for every post query, listing and detail alike.
pub const POST_TYPE: &str = "posts";
