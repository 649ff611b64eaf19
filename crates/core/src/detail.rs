//! Pure assembly of the post and author detail views.
//!
//! The shell fetches the raw entities (concurrently where possible) and hands
//! them here; nothing in this module knows where the data came from.

use regex::Regex;
use serde::Serialize;

use crate::models::{Author, Comment, Post};

/// Related posts shown under a post detail
pub const RELATED_POSTS_LIMIT: usize = 3;

/// Excerpt length on list cards
pub const LIST_EXCERPT_CHARS: usize = 120;

/// Excerpt length on related-post and author-post cards
pub const CARD_EXCERPT_CHARS: usize = 100;

/// Name shown when a post references an author that is not loaded
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Condensed post used by list pages and detail cards
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    pub author_id: u64,
    pub author_name: String,
}

/// Everything the post detail view renders
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post: Post,
    pub author: Option<Author>,
    pub comments: Vec<Comment>,
    pub related_posts: Vec<PostSummary>,
    pub total_related: usize,
}

/// Everything the author detail view renders
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AuthorDetail {
    pub author: Author,
    pub post_count: usize,
    pub posts: Vec<PostSummary>,
}

/// Truncate `text` to at most `max_chars` characters, appending `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Look up an author's display name, falling back to `"Unknown"`.
pub fn author_name(users: &[Author], author_id: u64) -> &str {
    users
        .iter()
        .find(|u| u.id == author_id)
        .map(|u| u.name.as_str())
        .unwrap_or(UNKNOWN_AUTHOR)
}

pub fn summarize(post: &Post, author_name: &str, excerpt_chars: usize) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        excerpt: excerpt(&post.body, excerpt_chars),
        author_id: post.author_id,
        author_name: author_name.to_string(),
    }
}

/// Other posts by the same author, excluding `post_id`, in source order.
pub fn related_posts(author_posts: &[Post], post_id: u64) -> Vec<&Post> {
    author_posts.iter().filter(|p| p.id != post_id).collect()
}

pub fn build_post_detail(
    post: Post,
    author: Option<Author>,
    comments: Vec<Comment>,
    author_posts: &[Post],
) -> PostDetail {
    let related = related_posts(author_posts, post.id);
    let total_related = related.len();
    let name = author
        .as_ref()
        .map(|a| a.name.as_str())
        .unwrap_or(UNKNOWN_AUTHOR);

    let related_posts = related
        .into_iter()
        .take(RELATED_POSTS_LIMIT)
        .map(|p| summarize(p, name, CARD_EXCERPT_CHARS))
        .collect();

    PostDetail {
        post,
        author,
        comments,
        related_posts,
        total_related,
    }
}

pub fn build_author_detail(author: Author, posts: &[Post]) -> AuthorDetail {
    let summaries: Vec<PostSummary> = posts
        .iter()
        .map(|p| summarize(p, &author.name, CARD_EXCERPT_CHARS))
        .collect();

    AuthorDetail {
        post_count: summaries.len(),
        posts: summaries,
        author,
    }
}

/// Parse an entity id from a bare number or a detail path.
///
/// Accepts `7`, `/posts/7`, and `https://host/posts/7` for `resource = "posts"`.
pub fn extract_entity_id(input: &str, resource: &str) -> Result<u64, String> {
    let input = input.trim();
    if let Ok(id) = input.parse::<u64>() {
        return Ok(id);
    }

    let pattern = format!(r"(?:^|/){}/(\d+)/?(?:[?#].*)?$", regex::escape(resource));
    let re = Regex::new(&pattern).map_err(|e| e.to_string())?;
    if let Some(caps) = re.captures(input) {
        if let Some(id_match) = caps.get(1) {
            return id_match
                .as_str()
                .parse::<u64>()
                .map_err(|_| format!("Failed to parse {resource} id from {input}"));
        }
    }

    Err(format!("Invalid {resource} id or path: {input}"))
}
