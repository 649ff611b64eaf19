//! In-process stand-in for the blog REST source, used by tests.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use blogview_core::models::{Address, Author, Comment, Company, Post};
use serde::Deserialize;

#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub posts: Vec<Post>,
    pub users: Vec<Author>,
    pub comments: Vec<Comment>,
    pub fail_users: bool,
}

fn post(id: u64, author_id: u64, title: &str, body: &str) -> Post {
    Post {
        id,
        author_id,
        title: title.to_string(),
        body: body.to_string(),
    }
}

fn author(id: u64, name: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
        username: String::new(),
        email: format!("author{id}@example.com"),
        website: format!("author{id}.example.org"),
        phone: "1-770-736-8031".to_string(),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: "Apt. 556".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: String::new(),
        },
        company: Company {
            name: "Romaguera-Crona".to_string(),
        },
    }
}

fn comment(id: u64, post_id: u64) -> Comment {
    Comment {
        id,
        post_id,
        name: format!("comment {id}"),
        email: "reader@example.com".to_string(),
        body: format!("remark {id} on post {post_id}"),
    }
}

impl Fixture {
    /// Twelve posts over three authors, with comments on posts 1, 2 and 7.
    pub fn sample() -> Self {
        Self {
            posts: vec![
                post(1, 1, "sunt aut facere", "quia et suscipit recusandae"),
                post(2, 1, "qui est esse", "est rerum tempore vitae"),
                post(3, 2, "ea molestias quasi", "et iusto sed quo iure QUISQUAM"),
                post(4, 2, "eum et est occaecati", "ullam et saepe reiciendis"),
                post(5, 3, "nesciunt quas odio", "repudiandae veniam quaerat"),
                post(6, 3, "Quisquam dolorem", "ut aspernatur corporis harum"),
                post(7, 1, "magnam facilis autem", "dolore placeat quibusdam"),
                post(8, 3, "dolorem dolore est", "dignissimos aperiam dolorem"),
                post(9, 2, "nesciunt iure omnis", "consectetur animi nesciunt"),
                post(10, 3, "optio molestias id", "quo et expedita quisquam modi"),
                post(11, 1, "et ea vero quia", "delectus reiciendis molestiae"),
                post(12, 2, "in quibusdam tempore", "itaque id aut magnam"),
            ],
            users: vec![
                author(1, "Leanne Graham"),
                author(2, "Ervin Howell"),
                author(3, "Clementine Bauch"),
            ],
            comments: vec![comment(1, 1), comment(2, 1), comment(3, 2), comment(4, 7)],
            fail_users: false,
        }
    }
}

type Shared = Arc<Fixture>;

#[derive(Debug, Deserialize)]
struct PostsQuery {
    #[serde(rename = "userId")]
    user_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CommentsQuery {
    #[serde(rename = "postId")]
    post_id: Option<u64>,
}

async fn list_posts(State(f): State<Shared>, Query(q): Query<PostsQuery>) -> Json<Vec<Post>> {
    let posts = f
        .posts
        .iter()
        .filter(|p| q.user_id.map_or(true, |id| p.author_id == id))
        .cloned()
        .collect();
    Json(posts)
}

async fn get_post(State(f): State<Shared>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    f.posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_users(State(f): State<Shared>) -> Result<Json<Vec<Author>>, StatusCode> {
    if f.fail_users {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(f.users.clone()))
}

async fn get_user(
    State(f): State<Shared>,
    Path(id): Path<u64>,
) -> Result<Json<Author>, StatusCode> {
    if f.fail_users {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    f.users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_comments(
    State(f): State<Shared>,
    Query(q): Query<CommentsQuery>,
) -> Json<Vec<Comment>> {
    let comments = f
        .comments
        .iter()
        .filter(|c| q.post_id.map_or(true, |id| c.post_id == id))
        .cloned()
        .collect();
    Json(comments)
}

/// Serve `fixture` on an ephemeral local port and return its base URL.
pub async fn spawn(fixture: Fixture) -> String {
    let app = Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/comments", get(list_comments))
        .with_state(Arc::new(fixture));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().expect("fixture server address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}
