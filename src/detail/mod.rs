//! Post detail flow
//!
//! Loads a single post by its slug and computes the derived display
//! fields. An unresolved slug is a fallback state, not an error: under
//! on-demand static generation the page may simply not exist yet.

use crate::client::{ClientError, ContentApi};
use crate::content::{richtext, PostDetail, POST_TYPE};

/// Outcome of resolving a slug
#[derive(Debug, Clone)]
pub enum DetailPage {
    Ready(Box<PostDetail>),
    /// The slug does not resolve yet; show the generating state
    Generating,
}

/// Fetch one post by slug and map it into the detail view model
pub async fn load_by_slug(api: &dyn ContentApi, slug: &str) -> Result<DetailPage, ClientError> {
    match api.get_by_uid(POST_TYPE, slug).await? {
        Some(doc) => Ok(DetailPage::Ready(Box::new(PostDetail::from_document(&doc)))),
        None => Ok(DetailPage::Generating),
    }
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Counts whitespace-separated words across every body block plus every
/// non-empty heading. A zero-word post yields 0; no minimum is applied.
pub fn reading_time(post: &PostDetail, words_per_minute: usize) -> usize {
    let body_words: usize = post
        .content
        .iter()
        .map(|section| richtext::as_text(&section.body).split_whitespace().count())
        .sum();

    let heading_words: usize = post
        .content
        .iter()
        .filter_map(|section| section.heading.as_deref())
        .map(|heading| heading.split_whitespace().count())
        .sum();

    (body_words + heading_words).div_ceil(words_per_minute.max(1))
}
