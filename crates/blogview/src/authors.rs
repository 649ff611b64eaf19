use crate::prelude::{eprintln, println, *};
use blogview_core::models::{Author, Post};
use blogview_core::query::CLI_NAME;
use colored::Colorize;
use serde::Serialize;

use crate::client::ApiClient;
use crate::session::Session;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AuthorsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One entry of the author selector
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AuthorOption {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub post_count: usize,
}

pub async fn run(options: AuthorsOptions, global: crate::Global) -> Result<()> {
    let client = ApiClient::new(&global.base_url)?;

    if global.verbose {
        eprintln!("Fetching authors from {}...", client.base_url());
    }

    let mut session = Session::new();
    let spinner = new_spinner("Loading authors...");
    session.load(&client).await;
    spinner.finish_and_clear();

    let entries = author_options(session.users(), session.posts());

    if options.json {
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_authors_text(&entries));
    }

    Ok(())
}

/// Selector entries in source order, with how many loaded posts each owns.
pub(crate) fn author_options(users: &[Author], posts: &[Post]) -> Vec<AuthorOption> {
    users
        .iter()
        .map(|u| AuthorOption {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            post_count: posts.iter().filter(|p| p.author_id == u.id).count(),
        })
        .collect()
}

pub(crate) fn format_authors_text(entries: &[AuthorOption]) -> String {
    if entries.is_empty() {
        return format!("\n{}\n\n", "No authors found.".yellow());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Email".bold().cyan(),
        "Posts".bold().cyan()
    ]);
    for entry in entries {
        table.add_row(prettytable::row![
            entry.id.to_string().bright_yellow(),
            entry.name.bright_white(),
            entry.email,
            entry.post_count
        ]);
    }

    format!(
        "\n{}\n{}: {}\n\n",
        table,
        "Filter posts by author".green(),
        format!("{CLI_NAME} list --author <id>").cyan()
    )
}
