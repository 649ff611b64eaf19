//! Interactive browsing session.
//!
//! Loads the collections once, then reads one command per line from stdin and
//! re-renders the affected view. The query state and the list view memo live
//! for the whole session.

use crate::prelude::{eprintln, println, *};
use blogview_core::detail::extract_entity_id;
use blogview_core::query::{query_total_pages, ListViewMemo, QueryState};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::client::ApiClient;
use crate::session::Session;
use crate::views::Navigator;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BrowseOptions {
    /// Initial search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Initial author filter
    #[arg(short, long)]
    pub author: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Reset,
    Author(Option<u64>),
    Next,
    Prev,
    Page(usize),
    List,
    Post(u64),
    User(u64),
    Help,
    Quit,
}

/// What the loop should render after applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowList,
    ShowPost(u64),
    ShowAuthor(u64),
    /// The command was valid but left the state unchanged
    Rejected(String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_lowercase().as_str() {
        "search" | "s" | "/" => Ok(Command::Search(rest.to_string())),
        "reset" => Ok(Command::Reset),
        "author" | "a" => match rest {
            "" | "all" => Ok(Command::Author(None)),
            id => id
                .parse::<u64>()
                .map(|id| Command::Author(Some(id)))
                .map_err(|_| format!("Invalid author id: {id}")),
        },
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" => Ok(Command::Prev),
        "page" => rest
            .parse::<usize>()
            .map(Command::Page)
            .map_err(|_| format!("Invalid page number: {rest}")),
        "list" | "l" | "back" => Ok(Command::List),
        "post" => extract_entity_id(rest, "posts").map(Command::Post),
        "user" | "profile" => extract_entity_id(rest, "users").map(Command::User),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {other}. Type `help` for a list.")),
    }
}

/// Browsing state that survives across commands
#[derive(Debug, Default)]
pub struct BrowseState {
    pub query: QueryState,
    pub memo: ListViewMemo,
}

impl BrowseState {
    pub fn apply(&mut self, command: Command, session: &Session) -> Action {
        let total_pages = query_total_pages(session.posts(), &self.query);

        match command {
            Command::Search(text) => {
                self.query.set_search_input(&text);
                self.query.commit_search();
                Action::ShowList
            }
            Command::Reset => {
                self.query.reset_search();
                Action::ShowList
            }
            Command::Author(author_id) => {
                self.query.select_author(author_id);
                Action::ShowList
            }
            Command::Next => {
                if self.query.next_page(total_pages) {
                    Action::ShowList
                } else {
                    Action::Rejected("Already on the last page.".to_string())
                }
            }
            Command::Prev => {
                if self.query.prev_page(total_pages) {
                    Action::ShowList
                } else {
                    Action::Rejected("Already on the first page.".to_string())
                }
            }
            Command::Page(page) => {
                if self.query.go_to_page(page, total_pages) {
                    Action::ShowList
                } else {
                    Action::Rejected(format!(
                        "Page {page} is out of range (1-{}).",
                        total_pages.max(1)
                    ))
                }
            }
            Command::List => Action::ShowList,
            Command::Post(id) => Action::ShowPost(id),
            Command::User(id) => Action::ShowAuthor(id),
            Command::Help => Action::Help,
            Command::Quit => Action::Quit,
        }
    }
}

fn help_text() -> String {
    let commands = [
        ("search <text>", "Filter posts by title or body"),
        ("reset", "Clear the search"),
        ("author <id|all>", "Filter posts by author"),
        ("next / prev", "Move between pages"),
        ("page <n>", "Jump to a page"),
        ("list", "Show the current page again"),
        ("post <id>", "Open a post with its comments"),
        ("user <id>", "Open an author's profile"),
        ("quit", "Leave the session"),
    ];

    let mut result = format!("\n{}\n", "COMMANDS".bright_white().bold());
    for (usage, description) in commands {
        result.push_str(&format!("  {:<18} {}\n", usage.cyan(), description));
    }
    result.push('\n');
    result
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let client = ApiClient::new(&global.base_url)?;

    let mut session = Session::new();
    let spinner = new_spinner("Loading posts...");
    session.load(&client).await;
    spinner.finish_and_clear();

    let mut state = BrowseState::default();
    if let Some(search) = &options.search {
        state.query.set_search_input(search);
        state.query.commit_search();
    }
    if options.author.is_some() {
        state.query.select_author(options.author);
    }

    let mut navigator = Navigator::new();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    render_list(&mut state, &session);
    print!("{}", help_text());

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("Received: {trimmed}");
        }

        let command = match parse_command(trimmed) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.red());
                continue;
            }
        };

        match state.apply(command, &session) {
            Action::ShowList => render_list(&mut state, &session),
            Action::ShowPost(id) => {
                let view = crate::post::load_post_view(&client, &mut navigator, id).await;
                print!("{}", crate::post::format_post_text(&view));
            }
            Action::ShowAuthor(id) => {
                let view = crate::author::load_author_view(&client, &mut navigator, id).await;
                print!("{}", crate::author::format_author_text(&view));
            }
            Action::Rejected(message) => println!("{}", message.yellow()),
            Action::Help => print!("{}", help_text()),
            Action::Quit => break,
        }
    }

    Ok(())
}

fn render_list(state: &mut BrowseState, session: &Session) {
    let view = state.memo.get_or_derive(
        session.generation(),
        session.posts(),
        session.users(),
        &state.query,
    );
    print!("{}", crate::list::format_list_text(view));
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogview_core::models::{Author, Post};
    use blogview_core::query::derive_list_view;

    fn session() -> Session {
        let posts: Vec<Post> = (1..=12)
            .map(|id| Post {
                id,
                author_id: if id % 4 == 0 { 3 } else { 1 },
                title: format!("post {id}"),
                body: if id == 6 { "quisquam".to_string() } else { "body".to_string() },
            })
            .collect();
        let users: Vec<Author> = vec![serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Clementine Bauch",
            "email": "Nathan@yesenia.net",
        }))
        .unwrap()];
        Session::with_collections(posts, users)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("search quisquam"), Ok(Command::Search("quisquam".into())));
        assert_eq!(parse_command("search"), Ok(Command::Search(String::new())));
        assert_eq!(parse_command("author 3"), Ok(Command::Author(Some(3))));
        assert_eq!(parse_command("author all"), Ok(Command::Author(None)));
        assert_eq!(parse_command("  NEXT "), Ok(Command::Next));
        assert_eq!(parse_command("page 2"), Ok(Command::Page(2)));
        assert_eq!(parse_command("post /posts/7"), Ok(Command::Post(7)));
        assert_eq!(parse_command("user 3"), Ok(Command::User(3)));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("page two").is_err());
        assert!(parse_command("author x").is_err());
        assert!(parse_command("post").is_err());
        assert!(parse_command("dance").unwrap_err().contains("Unknown command"));
    }

    #[test]
    fn test_search_with_spaces_kept_whole() {
        assert_eq!(
            parse_command("search sunt aut facere"),
            Ok(Command::Search("sunt aut facere".into()))
        );
    }

    #[test]
    fn test_navigation_clamps_at_bounds() {
        let session = session();
        let mut state = BrowseState::default();

        assert!(matches!(state.apply(Command::Prev, &session), Action::Rejected(_)));
        assert!(matches!(state.apply(Command::Page(0), &session), Action::Rejected(_)));
        assert!(matches!(state.apply(Command::Page(4), &session), Action::Rejected(_)));
        assert_eq!(state.query.page, 1);

        assert_eq!(state.apply(Command::Page(3), &session), Action::ShowList);
        assert!(matches!(state.apply(Command::Next, &session), Action::Rejected(_)));
        assert_eq!(state.query.page, 3);
    }

    #[test]
    fn test_author_then_empty_search_resets_page() {
        let session = session();
        let mut state = BrowseState::default();
        state.apply(Command::Next, &session);
        assert_eq!(state.query.page, 2);

        state.apply(Command::Author(Some(3)), &session);
        state.apply(Command::Search(String::new()), &session);

        assert_eq!(state.query.page, 1);
        let view = derive_list_view(session.posts(), session.users(), &state.query);
        assert_eq!(
            view.posts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![4, 8, 12]
        );
        assert_eq!(view.posts[0].author_name, "Clementine Bauch");
    }

    #[test]
    fn test_search_then_reset() {
        let session = session();
        let mut state = BrowseState::default();

        state.apply(Command::Search("QUISQUAM".into()), &session);
        let view = derive_list_view(session.posts(), session.users(), &state.query);
        assert_eq!(view.posts.len(), 1);
        assert_eq!(view.posts[0].id, 6);
        assert_eq!(view.posts[0].author_name, "Unknown");

        state.apply(Command::Reset, &session);
        assert_eq!(query_total_pages(session.posts(), &state.query), 3);
    }

    #[test]
    fn test_detail_commands_pass_through() {
        let session = session();
        let mut state = BrowseState::default();

        assert_eq!(state.apply(Command::Post(7), &session), Action::ShowPost(7));
        assert_eq!(state.apply(Command::User(3), &session), Action::ShowAuthor(3));
        assert_eq!(state.query, QueryState::default());
    }

    #[test]
    fn test_render_list_fills_memo() {
        let session = session();
        let mut state = BrowseState::default();

        render_list(&mut state, &session);

        assert!(state.memo.is_cached(session.generation(), &state.query));
    }
}
