use blogview_core::models::{Author, Post};

use crate::client::ApiClient;
use crate::error::log_fetch_failure;

/// Posts and users fetched once for the browsing session.
///
/// Owned by whichever command drives the session and lent to the views that
/// read it. A failed load leaves both collections empty.
#[derive(Debug)]
pub struct Session {
    posts: Vec<Post>,
    users: Vec<Author>,
    loading: bool,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            users: Vec::new(),
            loading: true,
            generation: 0,
        }
    }

    /// Fetch posts and users concurrently and store them.
    ///
    /// Both fetches must succeed; on any failure the error is logged and the
    /// collections are cleared. The loading flag is cleared either way.
    pub async fn load(&mut self, client: &ApiClient) {
        self.loading = true;

        match futures::try_join!(client.fetch_posts(), client.fetch_users()) {
            Ok((posts, users)) => {
                log::info!("Loaded {} posts and {} users", posts.len(), users.len());
                self.posts = posts;
                self.users = users;
            }
            Err(err) => {
                log_fetch_failure("data", &err);
                self.posts.clear();
                self.users.clear();
            }
        }

        self.generation += 1;
        self.loading = false;
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn users(&self) -> &[Author] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Bumped on every load; keys the list view memo.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn with_collections(posts: Vec<Post>, users: Vec<Author>) -> Self {
        Self {
            posts,
            users,
            loading: false,
            generation: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture_server::{self, Fixture};

    #[test]
    fn test_new_session_is_loading_and_empty() {
        let session = Session::new();

        assert!(session.is_loading());
        assert!(session.posts().is_empty());
        assert!(session.users().is_empty());
        assert_eq!(session.generation(), 0);
    }

    #[tokio::test]
    async fn test_load_populates_collections() {
        let base = fixture_server::spawn(Fixture::sample()).await;
        let client = ApiClient::new(&base).unwrap();
        let mut session = Session::new();

        session.load(&client).await;

        assert!(!session.is_loading());
        assert_eq!(session.posts().len(), 12);
        assert_eq!(session.users().len(), 3);
        assert_eq!(session.generation(), 1);
    }

    #[tokio::test]
    async fn test_failed_leg_leaves_empty_collections() {
        let mut fixture = Fixture::sample();
        fixture.fail_users = true;
        let base = fixture_server::spawn(fixture).await;
        let client = ApiClient::new(&base).unwrap();
        let mut session = Session::new();

        session.load(&client).await;

        assert!(!session.is_loading());
        assert!(session.posts().is_empty());
        assert!(session.users().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_source_clears_loading() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let mut session = Session::new();

        session.load(&client).await;

        assert!(!session.is_loading());
        assert!(session.posts().is_empty());
    }
}
