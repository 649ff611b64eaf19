use crate::prelude::{eprintln, println, *};
use blogview_core::query::{derive_list_view, ListView, QueryState, CLI_NAME};
use colored::Colorize;

use crate::client::ApiClient;
use crate::session::Session;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Only show posts whose title or body contains this text (case-insensitive)
    #[arg(short, long, env = "BLOGVIEW_SEARCH")]
    pub search: Option<String>,

    /// Only show posts by this author id
    #[arg(short, long)]
    pub author: Option<u64>,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let client = ApiClient::new(&global.base_url)?;

    if global.verbose {
        eprintln!("Fetching posts and users from {}...", client.base_url());
    }

    let mut session = Session::new();
    let spinner = new_spinner("Loading posts...");
    session.load(&client).await;
    spinner.finish_and_clear();

    let query = QueryState::new(
        options.search.as_deref().unwrap_or_default(),
        options.author,
        options.page,
    );
    let view = derive_list_view(session.posts(), session.users(), &query);

    if options.json {
        println!("{}", format_list_json(&view)?);
    } else {
        print!("{}", format_list_text(&view));
    }

    Ok(())
}

pub(crate) fn format_list_json(view: &ListView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Render a list page with colours and navigation hints
pub(crate) fn format_list_text(view: &ListView) -> String {
    let mut result = String::new();
    let info = &view.pagination;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "POSTS (Page {} of {})",
            info.current_page,
            info.total_pages.max(1)
        )
        .bright_cyan()
        .bold()
    ));
    if !view.search_term.is_empty() {
        result.push_str(&format!(
            "{}: {}\n",
            "Search".green(),
            view.search_term.bright_white()
        ));
    }
    if let Some(name) = &view.author_filter_name {
        result.push_str(&format!("{}: {}\n", "Author".green(), name.bright_white()));
    }
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if view.is_empty() {
        result.push_str(&format!("\n{}\n", "No posts found.".yellow()));
    } else {
        for post in &view.posts {
            result.push_str(&format!(
                "\n{} {}\n",
                format!("[{}]", post.id).yellow().bold(),
                post.title.white().bold()
            ));
            result.push_str(&format!("    {}\n", post.excerpt));
            result.push_str(&format!(
                "    {}: {} | {}: {}\n",
                "Author".green(),
                post.author_name.bright_magenta(),
                "Read".green(),
                format!("{CLI_NAME} post {}", post.id).cyan()
            ));
        }
    }

    if info.has_controls() {
        result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
        result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
        result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

        result.push_str(&format!(
            "\n{} {} {} {} ({} {})\n",
            "Showing page".bright_white(),
            info.current_page.to_string().bright_cyan().bold(),
            "of".bright_white(),
            info.total_pages.to_string().bright_cyan().bold(),
            info.total_items.to_string().bright_cyan().bold(),
            "matching posts".bright_white()
        ));

        if let Some(next) = &info.next_page_command {
            result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
        }
        if let Some(prev) = &info.prev_page_command {
            result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
        }
    }

    result.push_str(&format!(
        "\n{}:\n",
        "To read an author's profile".bright_white().bold()
    ));
    result.push_str(&format!("  {}\n", format!("{CLI_NAME} author <id>").cyan()));
    if let Some(first) = view.posts.first() {
        result.push_str(&format!(
            "  {}: {}\n",
            "Example".green(),
            format!("{CLI_NAME} author {}", first.author_id).cyan()
        ));
    }

    result.push('\n');
    result
}
