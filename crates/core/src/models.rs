//! Wire models for the blog REST source.
//!
//! Field names follow the upstream JSON (`userId`, `postId`) through serde
//! renames so the rest of the crate can use snake_case.

use serde::{Deserialize, Serialize};

/// Blog post from API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId")]
    pub author_id: u64,
    pub title: String,
    pub body: String,
}

/// Post author (a "user" upstream)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
}

impl Address {
    /// Single-line form: `street, suite, city`
    pub fn one_line(&self) -> String {
        [&self.street, &self.suite, &self.city]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Company {
    #[serde(default)]
    pub name: String,
}

/// Comment attached to a single post
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    #[serde(rename = "postId")]
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}
