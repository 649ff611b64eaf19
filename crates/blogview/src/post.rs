use crate::prelude::{eprintln, println, *};
use blogview_core::detail::{build_post_detail, extract_entity_id, PostDetail};
use blogview_core::query::CLI_NAME;
use colored::Colorize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::views::{settle, Navigator, ViewState};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct PostOptions {
    /// Post id or detail path (e.g., "7" or "/posts/7")
    #[clap(env = "BLOGVIEW_POST")]
    pub post: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: PostOptions, global: crate::Global) -> Result<()> {
    let post_id = extract_entity_id(&options.post, "posts").map_err(|e| eyre!(e))?;
    let client = ApiClient::new(&global.base_url)?;

    if global.verbose {
        eprintln!("Fetching post ID: {}", post_id);
    }

    let mut navigator = Navigator::new();
    let state = load_post_view(&client, &mut navigator, post_id).await;

    if options.json {
        println!("{}", format_post_json(&state)?);
    } else {
        print!("{}", format_post_text(&state));
    }

    Ok(())
}

/// Fetch the post, then its author, comments, and sibling posts concurrently.
///
/// Any failing leg fails the whole assembly.
pub async fn post_detail_data(client: &ApiClient, post_id: u64) -> Result<PostDetail, Error> {
    let post = client.fetch_post(post_id).await?;

    let (author, comments, author_posts) = futures::try_join!(
        client.fetch_user(post.author_id),
        client.fetch_comments_for_post(post.id),
        client.fetch_posts_by_author(post.author_id),
    )?;

    Ok(build_post_detail(post, Some(author), comments, &author_posts))
}

/// Activate the post view and settle it, with the spinner shown meanwhile.
pub(crate) async fn load_post_view(
    client: &ApiClient,
    navigator: &mut Navigator,
    post_id: u64,
) -> ViewState<PostDetail> {
    let token = navigator.activate();
    let spinner = new_spinner(format!("Loading post {post_id}..."));
    let state = settle(&token, "post details", post_detail_data(client, post_id)).await;
    spinner.finish_and_clear();

    state.unwrap_or(ViewState::Loading)
}

pub(crate) fn format_post_json(state: &ViewState<PostDetail>) -> Result<String> {
    let value = match state {
        ViewState::Ready(detail) => serde_json::to_value(detail)?,
        _ => serde_json::json!({ "post": null, "message": "Post not found" }),
    };
    serde_json::to_string_pretty(&value).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

pub(crate) fn format_post_text(state: &ViewState<PostDetail>) -> String {
    let detail = match state {
        ViewState::Ready(detail) => detail,
        ViewState::Loading => return format!("\n{}\n\n", "Loading...".bright_black()),
        ViewState::Absent => return format!("\n{}\n\n", "Post not found".red()),
    };

    let mut result = String::new();
    let post = &detail.post;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", post.title.bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("\n{}\n", post.body));

    if let Some(author) = &detail.author {
        result.push_str(&format!(
            "\n{}: {} ({})\n",
            "Author".green(),
            author.name.bright_magenta(),
            format!("{CLI_NAME} author {}", author.id).cyan()
        ));
        result.push_str(&format!("{}: {}\n", "Email".green(), author.email));
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!(
        "{}\n",
        format!("COMMENTS ({})", detail.comments.len())
            .bright_yellow()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    if detail.comments.is_empty() {
        result.push_str(&format!("\n{}\n", "No comments on this post.".yellow()));
    }
    for comment in &detail.comments {
        result.push_str(&format!(
            "\n{} {}\n",
            comment.name.white().bold(),
            format!("({})", comment.email).bright_black()
        ));
        result.push_str(&format!("{}\n", comment.body));
    }

    if !detail.related_posts.is_empty() {
        let by = detail
            .author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("this author");
        result.push_str(&format!("\n{}\n", "-".repeat(80)));
        result.push_str(&format!(
            "{}\n",
            format!("RELATED POSTS BY {}", by.to_uppercase()).bold()
        ));
        result.push_str(&format!("{}\n", "-".repeat(80)));

        for related in &detail.related_posts {
            result.push_str(&format!(
                "\n  {} {}\n",
                format!("[{}]", related.id).yellow().bold(),
                related.title.white().bold()
            ));
            result.push_str(&format!("  {}\n", related.excerpt));
        }
        if detail.total_related > detail.related_posts.len() {
            result.push_str(&format!(
                "\n  {} more: {}\n",
                detail.total_related - detail.related_posts.len(),
                format!("{CLI_NAME} list --author {}", post.author_id).cyan()
            ));
        }
    }

    result.push_str(&format!(
        "\n{}: {}\n\n",
        "Back to posts".green(),
        format!("{CLI_NAME} list").cyan()
    ));
    result
}
