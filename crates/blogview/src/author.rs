use crate::prelude::{eprintln, println, *};
use blogview_core::detail::{build_author_detail, extract_entity_id, AuthorDetail};
use blogview_core::query::CLI_NAME;
use colored::Colorize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::views::{settle, Navigator, ViewState};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AuthorOptions {
    /// Author id or profile path (e.g., "3" or "/users/3")
    #[clap(env = "BLOGVIEW_AUTHOR")]
    pub author: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: AuthorOptions, global: crate::Global) -> Result<()> {
    let author_id = extract_entity_id(&options.author, "users").map_err(|e| eyre!(e))?;
    let client = ApiClient::new(&global.base_url)?;

    if global.verbose {
        eprintln!("Fetching author ID: {}", author_id);
    }

    let mut navigator = Navigator::new();
    let state = load_author_view(&client, &mut navigator, author_id).await;

    if options.json {
        println!("{}", format_author_json(&state)?);
    } else {
        print!("{}", format_author_text(&state));
    }

    Ok(())
}

/// Fetch the author and their posts concurrently.
pub async fn author_detail_data(client: &ApiClient, author_id: u64) -> Result<AuthorDetail, Error> {
    let (author, posts) = futures::try_join!(
        client.fetch_user(author_id),
        client.fetch_posts_by_author(author_id),
    )?;

    Ok(build_author_detail(author, &posts))
}

pub(crate) async fn load_author_view(
    client: &ApiClient,
    navigator: &mut Navigator,
    author_id: u64,
) -> ViewState<AuthorDetail> {
    let token = navigator.activate();
    let spinner = new_spinner(format!("Loading author {author_id}..."));
    let state = settle(&token, "author details", author_detail_data(client, author_id)).await;
    spinner.finish_and_clear();

    state.unwrap_or(ViewState::Loading)
}

pub(crate) fn format_author_json(state: &ViewState<AuthorDetail>) -> Result<String> {
    let value = match state {
        ViewState::Ready(detail) => serde_json::to_value(detail)?,
        _ => serde_json::json!({ "author": null, "message": "Author not found." }),
    };
    serde_json::to_string_pretty(&value).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

pub(crate) fn format_author_text(state: &ViewState<AuthorDetail>) -> String {
    let detail = match state {
        ViewState::Ready(detail) => detail,
        ViewState::Loading => return format!("\n{}\n\n", "Loading...".bright_black()),
        ViewState::Absent => return format!("\n{}\n\n", "Author not found.".red()),
    };

    let mut result = String::new();
    let author = &detail.author;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", author.name.bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    let mut table = new_table();
    table.add_row(prettytable::row!["Email".bold().cyan(), author.email]);
    table.add_row(prettytable::row!["Phone".bold().cyan(), author.phone]);
    table.add_row(prettytable::row!["Website".bold().cyan(), author.website]);
    table.add_row(prettytable::row![
        "Address".bold().cyan(),
        author.address.one_line()
    ]);
    table.add_row(prettytable::row!["Company".bold().cyan(), author.company.name]);
    result.push('\n');
    result.push_str(&table.to_string());

    result.push_str(&format!(
        "\n{}\n",
        format!("{} posts published", detail.post_count)
            .bright_yellow()
            .bold()
    ));

    if !detail.posts.is_empty() {
        result.push_str(&format!("\n{}\n", "-".repeat(80)));
        result.push_str(&format!(
            "{}\n",
            format!("POSTS BY {}", author.name.to_uppercase()).bold()
        ));
        result.push_str(&format!("{}\n", "-".repeat(80)));

        for post in &detail.posts {
            result.push_str(&format!(
                "\n{} {}\n",
                format!("[{}]", post.id).yellow().bold(),
                post.title.white().bold()
            ));
            result.push_str(&format!("    {}\n", post.excerpt));
            result.push_str(&format!(
                "    {}: {}\n",
                "Read".green(),
                format!("{CLI_NAME} post {}", post.id).cyan()
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
