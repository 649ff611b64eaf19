//! Search and author filtering over a fetched posts collection.

use crate::models::Post;

/// Committed search term plus optional author selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PostFilter {
    term: String,
    author_id: Option<u64>,
}

impl PostFilter {
    pub fn new(term: &str, author_id: Option<u64>) -> Self {
        Self {
            term: term.to_lowercase(),
            author_id,
        }
    }

    /// True when the title or body contains the term (case-insensitive) and
    /// the post belongs to the selected author, if any.
    pub fn matches(&self, post: &Post) -> bool {
        let matches_author = self.author_id.map_or(true, |id| post.author_id == id);
        if !matches_author {
            return false;
        }

        if self.term.is_empty() {
            return true;
        }

        post.title.to_lowercase().contains(&self.term)
            || post.body.to_lowercase().contains(&self.term)
    }
}

/// Filter posts by search term and author, preserving source order.
///
/// An empty term matches every post. An empty result is a valid
/// "no matches" answer, not an error.
pub fn filter_posts<'a>(
    posts: &'a [Post],
    search_term: &str,
    author_id: Option<u64>,
) -> Vec<&'a Post> {
    let filter = PostFilter::new(search_term, author_id);
    posts.iter().filter(|post| filter.matches(post)).collect()
}
