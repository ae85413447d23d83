//! Raw document shapes returned by the content repository

use serde::{Deserialize, Serialize};

/// A document exactly as the content repository returns it
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub uid: String,

    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub data: RawData,
}

/// The `data` envelope of a raw document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Option<RawBanner>,
    pub content: Vec<RawSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBanner {
    #[serde(default)]
    pub url: String,
}

/// One `{heading, body}` pair of a document's content sequence
#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub heading: Option<String>,

    #[serde(default)]
    pub body: Vec<RichTextBlock>,
}

/// A structured rich-text block with inline formatting spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub spans: Vec<Span>,
}

impl RichTextBlock {
    /// A plain paragraph without inline formatting
    pub fn paragraph(text: &str) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
            spans: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading1")]
    Heading1,
    #[serde(rename = "heading2")]
    Heading2,
    #[serde(rename = "heading3")]
    Heading3,
    #[serde(rename = "heading4")]
    Heading4,
    #[serde(rename = "heading5")]
    Heading5,
    #[serde(rename = "heading6")]
    Heading6,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "o-list-item")]
    OrderedListItem,
    #[serde(rename = "preformatted")]
    Preformatted,
}

/// An inline formatting span over a character range of the block text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,

    #[serde(flatten)]
    pub kind: SpanKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink { data: LinkData },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkData {
    pub url: String,
}
