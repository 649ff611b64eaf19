//! List view query state and the list view derived from it.
//!
//! [`QueryState`] only changes through the transitions defined here, which
//! encode the reset rules: committing or resetting a search and changing the
//! author filter all return to page 1, and page navigation outside
//! `[1, total_pages]` leaves the state unchanged.

use serde::Serialize;

use crate::detail::{author_name, summarize, PostSummary, LIST_EXCERPT_CHARS};
use crate::filter::filter_posts;
use crate::models::{Author, Post};
use crate::pagination::{build_page_info, page_slice, total_pages, PageInfo, POSTS_PER_PAGE};

/// Binary name used when building navigation commands
pub const CLI_NAME: &str = "blogview";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QueryState {
    /// Text typed but not yet committed
    pub search_input: String,
    /// Committed search term the filter applies
    pub search_term: String,
    pub author_filter: Option<u64>,
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            search_term: String::new(),
            author_filter: None,
            page: 1,
        }
    }
}

impl QueryState {
    pub fn new(search_term: &str, author_filter: Option<u64>, page: usize) -> Self {
        Self {
            search_input: search_term.to_string(),
            search_term: search_term.to_string(),
            author_filter,
            page: page.max(1),
        }
    }

    /// Update the draft search text; the filter is untouched until committed.
    pub fn set_search_input(&mut self, text: &str) {
        self.search_input = text.to_string();
    }

    pub fn commit_search(&mut self) {
        self.search_term = self.search_input.clone();
        self.page = 1;
    }

    pub fn reset_search(&mut self) {
        self.search_input.clear();
        self.search_term.clear();
        self.page = 1;
    }

    pub fn select_author(&mut self, author_id: Option<u64>) {
        self.author_filter = author_id;
        self.page = 1;
    }

    /// Move to `page` if it is within `[1, total_pages]`.
    ///
    /// Returns whether the state changed.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if !crate::pagination::can_navigate(page, total_pages) {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.page + 1, total_pages)
    }

    pub fn prev_page(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.page.saturating_sub(1), total_pages)
    }

    /// CLI command reproducing this query, without the page flag.
    pub fn list_command(&self) -> String {
        let mut command = format!("{CLI_NAME} list");
        if !self.search_term.is_empty() {
            let quoted = shlex::try_quote(&self.search_term)
                .map(|q| q.into_owned())
                .unwrap_or_else(|_| format!("{:?}", self.search_term));
            command.push_str(&format!(" --search {quoted}"));
        }
        if let Some(author_id) = self.author_filter {
            command.push_str(&format!(" --author {author_id}"));
        }
        command
    }
}

/// Derived list view: one page of the filtered posts plus metadata
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListView {
    pub search_term: String,
    pub author_filter: Option<u64>,
    pub author_filter_name: Option<String>,
    pub posts: Vec<PostSummary>,
    pub pagination: PageInfo,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Number of pages the query yields over `posts`.
pub fn query_total_pages(posts: &[Post], query: &QueryState) -> usize {
    total_pages(
        filter_posts(posts, &query.search_term, query.author_filter).len(),
        POSTS_PER_PAGE,
    )
}

/// Compute the list view for `query` over the loaded collections.
///
/// The requested page is clamped for display, so a stale page number after
/// the collection shrinks still renders the nearest valid page.
pub fn derive_list_view(posts: &[Post], users: &[Author], query: &QueryState) -> ListView {
    let filtered = filter_posts(posts, &query.search_term, query.author_filter);
    let pagination = build_page_info(
        filtered.len(),
        query.page,
        POSTS_PER_PAGE,
        &query.list_command(),
    );

    let rows = page_slice(&filtered, pagination.current_page, POSTS_PER_PAGE)
        .iter()
        .map(|post| {
            summarize(
                post,
                author_name(users, post.author_id),
                LIST_EXCERPT_CHARS,
            )
        })
        .collect();

    ListView {
        search_term: query.search_term.clone(),
        author_filter: query.author_filter,
        author_filter_name: query
            .author_filter
            .map(|id| author_name(users, id).to_string()),
        posts: rows,
        pagination,
    }
}

/// Single-entry memo for [`derive_list_view`].
///
/// Keyed on the caller-supplied collection generation and the query state.
/// The caller owns the memo and bumps the generation whenever the
/// collections are replaced.
#[derive(Debug, Default)]
pub struct ListViewMemo {
    entry: Option<((u64, QueryState), ListView)>,
}

impl ListViewMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_derive(
        &mut self,
        generation: u64,
        posts: &[Post],
        users: &[Author],
        query: &QueryState,
    ) -> &ListView {
        if !self.is_cached(generation, query) {
            self.entry = None;
        }
        let (_, view) = self.entry.get_or_insert_with(|| {
            (
                (generation, query.clone()),
                derive_list_view(posts, users, query),
            )
        });
        view
    }

    pub fn is_cached(&self, generation: u64, query: &QueryState) -> bool {
        matches!(&self.entry, Some(((g, q), _)) if *g == generation && q == query)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
