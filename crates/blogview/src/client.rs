//! HTTP access to the blog REST source.
//!
//! Every call returns either the complete collection/entity or an [`Error`];
//! callers decide how a failure degrades.

use blogview_core::models::{Author, Comment, Post};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::Error;

pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("blogview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, u64)],
    ) -> Result<T, Error> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url} {query:?}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url));
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<T>().await.map_err(|e| Error::Decode {
            url,
            message: e.to_string(),
        })
    }

    pub async fn fetch_posts(&self) -> Result<Vec<Post>, Error> {
        self.get_json("/posts", &[]).await
    }

    pub async fn fetch_post(&self, id: u64) -> Result<Post, Error> {
        self.get_json(&format!("/posts/{id}"), &[]).await
    }

    pub async fn fetch_posts_by_author(&self, author_id: u64) -> Result<Vec<Post>, Error> {
        self.get_json("/posts", &[("userId", author_id)]).await
    }

    pub async fn fetch_users(&self) -> Result<Vec<Author>, Error> {
        self.get_json("/users", &[]).await
    }

    pub async fn fetch_user(&self, id: u64) -> Result<Author, Error> {
        self.get_json(&format!("/users/{id}"), &[]).await
    }

    pub async fn fetch_comments_for_post(&self, post_id: u64) -> Result<Vec<Comment>, Error> {
        self.get_json("/comments", &[("postId", post_id)]).await
    }
}
