#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod author;
mod authors;
mod browse;
mod client;
mod error;
#[cfg(test)]
mod fixture_server;
mod list;
mod post;
mod prelude;
mod session;
mod views;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse blog posts, authors, and comments from a read-only REST source"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base address of the blog REST source
    #[clap(
        long,
        env = "BLOGVIEW_API_BASE",
        global = true,
        default_value = client::DEFAULT_API_BASE
    )]
    base_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "BLOGVIEW_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List posts with search, author filter, and pagination
    List(crate::list::ListOptions),

    /// Show a post with its author, comments, and related posts
    Post(crate::post::PostOptions),

    /// Show an author's profile and posts
    Author(crate::author::AuthorOptions),

    /// List the authors available for filtering
    Authors(crate::authors::AuthorsOptions),

    /// Start an interactive browsing session
    Browse(crate::browse::BrowseOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Post(options) => crate::post::run(options, app.global).await,
        SubCommands::Author(options) => crate::author::run(options, app.global).await,
        SubCommands::Authors(options) => crate::authors::run(options, app.global).await,
        SubCommands::Browse(options) => crate::browse::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        App::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let app = App::try_parse_from([
            "blogview",
            "list",
            "--search",
            "quisquam",
            "--author",
            "3",
            "--page",
            "2",
            "--base-url",
            "http://localhost:3000",
        ])
        .unwrap();

        assert_eq!(app.global.base_url, "http://localhost:3000");
        match app.command {
            SubCommands::List(options) => {
                assert_eq!(options.search.as_deref(), Some("quisquam"));
                assert_eq!(options.author, Some(3));
                assert_eq!(options.page, 2);
                assert!(!options.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_post_with_path() {
        let app = App::try_parse_from(["blogview", "post", "/posts/7", "--json"]).unwrap();

        match app.command {
            SubCommands::Post(options) => {
                assert_eq!(options.post, "/posts/7");
                assert!(options.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
