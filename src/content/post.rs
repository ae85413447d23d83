//! Post view models
//!
//! Every field is re-selected explicitly from the raw document; the
//! server response shape is not trusted as-is.

use serde::Serialize;

use super::document::{RawDocument, RichTextBlock};
use crate::helpers::date;

/// A post as shown on the listing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub uid: String,

    /// Display-formatted publication date
    pub first_publication_date: Option<String>,

    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Normalize a raw document into a summary.
    ///
    /// The publication date is formatted here and nowhere else, so each
    /// summary is formatted exactly once no matter how often it is
    /// rendered.
    pub fn from_document(doc: &RawDocument, date_format: &str) -> Self {
        Self {
            uid: doc.uid.clone(),
            first_publication_date: doc
                .first_publication_date
                .as_deref()
                .map(|raw| date::display_date(raw, date_format)),
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
        }
    }
}

/// A fully-loaded post for the detail page
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    pub uid: String,

    /// Raw publication timestamp; formatted at render time
    pub first_publication_date: Option<String>,

    pub title: String,
    pub banner_url: Option<String>,
    pub author: String,

    /// Content sections in source order
    pub content: Vec<ContentSection>,
}

/// One `{heading, body}` section of a post
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSection {
    pub heading: Option<String>,
    pub body: Vec<RichTextBlock>,
}

impl PostDetail {
    /// Map a raw document into a detail view model, copying the content
    /// sections in source order.
    pub fn from_document(doc: &RawDocument) -> Self {
        Self {
            uid: doc.uid.clone(),
            first_publication_date: doc.first_publication_date.clone(),
            title: doc.data.title.clone(),
            banner_url: doc.data.banner.as_ref().map(|b| b.url.clone()),
            author: doc.data.author.clone(),
            content: doc
                .data
                .content
                .iter()
                .map(|section| ContentSection {
                    heading: section.heading.clone(),
                    body: section.body.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::{RawBanner, RawData, RawSection};

    fn raw_document() -> RawDocument {
        RawDocument {
            uid: "how-to-orbit".to_string(),
            first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
            data: RawData {
                title: "How to orbit".to_string(),
                subtitle: "Falling with style".to_string(),
                author: "Ada".to_string(),
                banner: Some(RawBanner {
                    url: "https://images.example.com/banner.png".to_string(),
                }),
                content: vec![
                    RawSection {
                        heading: Some("Intro".to_string()),
                        body: vec![RichTextBlock::paragraph("one two three")],
                    },
                    RawSection {
                        heading: None,
                        body: vec![RichTextBlock::paragraph("four five")],
                    },
                ],
            },
        }
    }

    #[test]
    fn test_summary_formats_date_once() {
        let summary = PostSummary::from_document(&raw_document(), "%d %b %Y");
        assert_eq!(summary.first_publication_date.as_deref(), Some("15 Mar 2021"));

        // normalizing the already-normalized value changes nothing
        let again =
            crate::helpers::date::display_date(summary.first_publication_date.as_deref().unwrap(), "%d %b %Y");
        assert_eq!(again, "15 Mar 2021");
    }

    #[test]
    fn test_summary_selects_fields() {
        let summary = PostSummary::from_document(&raw_document(), "%d %b %Y");
        assert_eq!(summary.uid, "how-to-orbit");
        assert_eq!(summary.title, "How to orbit");
        assert_eq!(summary.subtitle, "Falling with style");
        assert_eq!(summary.author, "Ada");
    }

    #[test]
    fn test_detail_preserves_section_order() {
        let detail = PostDetail::from_document(&raw_document());
        assert_eq!(detail.content.len(), 2);
        assert_eq!(detail.content[0].heading.as_deref(), Some("Intro"));
        assert_eq!(detail.content[0].body[0].text, "one two three");
        assert!(detail.content[1].heading.is_none());
        assert_eq!(detail.content[1].body[0].text, "four five");
        assert_eq!(
            detail.banner_url.as_deref(),
            Some("https://images.example.com/banner.png")
        );
    }
}
