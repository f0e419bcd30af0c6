//! Line-driven terminal front end.
//!
//! Plain text lines are typed into the keyword input; lines starting with `:`
//! are commands that click controls. Settings are read from the config file
//! and `key=value` arguments, e.g.
//!
//! ```text
//! reposearch per_page=20 theme=catppuccin-latte
//! reposearch config=~/reposearch.toml
//! ```

#![allow(clippy::multiple_crate_versions)]

use reposearch::app::Control;
use reposearch::infrastructure::{expand_tilde, get_config_file};
use reposearch::observability::init_tracing;
use reposearch::source::SharedSource;
use reposearch::{Config, GithubSource, RawEvent, RenderSink, SearchError, Session, TerminalSink, Theme};
use std::collections::BTreeMap;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
type text to edit the keyword, then:
  :search  :s        run the search
  :find <text>       set the keyword and search
  :stars   :forks    sort by stars / forks (again to flip direction)
  :next    :n        next page
  :prev    :p        previous page
  :per <n>           rows per page
  :help              this help
  :quit    :q        exit";

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Events(Vec<RawEvent>),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let Some(command) = line.strip_prefix(':') else {
        return Command::Events(vec![RawEvent::input(Control::Keyword.id(), line)]);
    };

    let (name, argument) = command
        .split_once(char::is_whitespace)
        .map_or((command.trim(), ""), |(name, rest)| (name, rest.trim()));
    let click = |control: Control| Command::Events(vec![RawEvent::click(control.id())]);

    match name {
        "search" | "s" => click(Control::Search),
        "stars" => click(Control::SortStars),
        "forks" => click(Control::SortForks),
        "next" | "n" => click(Control::NextPage),
        "prev" | "p" => click(Control::PreviousPage),
        "per" => Command::Events(vec![RawEvent::change(Control::PerPage.id(), argument)]),
        "find" => Command::Events(vec![
            RawEvent::input(Control::Keyword.id(), argument),
            RawEvent::click(Control::Search.id()),
        ]),
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Reads the config file and applies `key=value` arguments on top.
///
/// `config=<path>` selects the file; otherwise the default location is used
/// when it exists. `GITHUB_TOKEN` fills in a missing API token.
fn load_config(args: &[String]) -> reposearch::Result<Config> {
    let mut overrides = BTreeMap::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(SearchError::Config(format!("expected key=value, got {arg:?}")));
        };
        overrides.insert(key.trim().to_string(), value.trim().to_string());
    }

    let file = overrides
        .get("config")
        .map(|path| expand_tilde(path))
        .or_else(|| Some(get_config_file()).filter(|path| path.exists()));
    let base = match file {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let mut config = base.with_overrides(&overrides);
    if config.api_token.is_none() {
        config.api_token = std::env::var("GITHUB_TOKEN").ok().filter(|token| !token.is_empty());
    }
    Ok(config)
}

async fn run() -> reposearch::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(&args)?;
    init_tracing(&config);
    tracing::debug!(api_base = %config.api_base, has_token = config.api_token.is_some(), "configuration loaded");

    let theme = Theme::from_config(&config)?;
    let source: SharedSource = Arc::new(GithubSource::new(&config)?);
    let sink: Arc<dyn RenderSink> = Arc::new(TerminalSink::stdout(theme));

    println!("{HELP}");
    let (session, events) = Session::new(&config, source, Arc::clone(&sink));
    let session = tokio::spawn(session.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Events(raw_events) => {
                for raw in raw_events {
                    events.send(raw)?;
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Unknown(name) => sink.alert(&format!("unknown command :{name}, try :help")),
            Command::Quit => break,
        }
    }

    drop(events);
    if let Err(e) = session.await {
        tracing::warn!(error = %e, "session task failed");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("reposearch: {e}");
            ExitCode::FAILURE
        }
    }
}
