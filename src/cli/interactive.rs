//! Interactive command handler
//!
//! Drives a geocoder widget from stdin. Plain lines are typed text and go
//! through the debounced autocomplete; lines starting with ':' are commands.

use crate::cli::ApiArgs;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::pelias::PeliasClient;
use crate::geo::{GeocodeBackend, Point};
use crate::widget::{Geocoder, Hooks, SelectionMethod};
use clap::Args;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive command arguments
#[derive(Args)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub api: ApiArgs,
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text(String),
    Select(usize),
    Reverse(Option<Point>),
    Clear,
    State,
    Focus,
    Blur,
    Help,
    Quit,
    Invalid(String),
}

/// Parse a line. Suggestions are numbered from 1 on screen.
pub fn parse_line(line: &str) -> Input {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Input::Text(line.to_string());
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    match (name, rest.as_slice()) {
        ("select" | "s", [n]) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Select(n - 1),
            _ => Input::Invalid(format!("Not a suggestion number: {}", n)),
        },
        ("reverse" | "r", []) => Input::Reverse(None),
        ("reverse" | "r", [point]) => parse_point(point),
        ("reverse" | "r", [lat, lon]) => parse_point(&format!("{},{}", lat, lon)),
        ("clear", []) => Input::Clear,
        ("state", []) => Input::State,
        ("focus", []) => Input::Focus,
        ("blur", []) => Input::Blur,
        ("help" | "h", []) => Input::Help,
        ("quit" | "q", []) => Input::Quit,
        _ => Input::Invalid(format!("Unknown command: {}", line)),
    }
}

fn parse_point(s: &str) -> Input {
    match s.parse::<Point>() {
        Ok(point) => Input::Reverse(Some(point)),
        Err(e) => Input::Invalid(e.to_string()),
    }
}

fn print_help() {
    eprintln!("Type an address to get suggestions. Commands:");
    eprintln!("  :select N          pick suggestion N");
    eprintln!("  :reverse [LAT LON] address nearest to a point (default: geocoder.center)");
    eprintln!("  :clear             reset the input");
    eprintln!("  :state             show the current input state");
    eprintln!("  :focus / :blur     move input focus");
    eprintln!("  :quit              leave");
}

/// Print the suggestion list whenever it changes
async fn watch_suggestions<B: GeocodeBackend>(geocoder: Geocoder<B>) {
    let mut rx = geocoder.subscribe();
    let mut shown: Vec<String> = Vec::new();

    while rx.changed().await.is_ok() {
        let rendered = geocoder.rendered_suggestions();
        if rendered == shown {
            continue;
        }
        for (i, line) in rendered.iter().enumerate() {
            println!("{:>3}. {}", i + 1, line);
        }
        if rendered.is_empty() {
            println!("(no suggestions)");
        }
        shown = rendered;
    }
}

fn hooks(formatter: Arc<dyn OutputFormatter>) -> Hooks {
    let on_reverse = Arc::clone(&formatter);

    Hooks::default()
        .on_suggestion_selected(move |event| {
            println!("Selected: {} ({})", event.suggestion_value, event.method);
            match formatter.format(&event.search) {
                Ok(output) => print!("{}", output),
                Err(e) => eprintln!("Error: {}", e),
            }
        })
        .on_reverse_selected(move |event| {
            match on_reverse.format(&event.search) {
                Ok(output) => print!("{}", output),
                Err(e) => eprintln!("Error: {}", e),
            }
        })
}

/// Run the interactive command
pub async fn run(args: InteractiveArgs) -> Result<()> {
    let config = Config::load()?;
    let formatter: Arc<dyn OutputFormatter> = Arc::from(args.api.formatter(&config)?);
    let geocoder_config = args.api.geocoder_config(&config);

    let client = PeliasClient::new(&geocoder_config)?;
    let geocoder = Geocoder::with_hooks(client, geocoder_config, hooks(formatter));
    geocoder.focus();

    let watcher = tokio::spawn(watch_suggestions(geocoder.clone()));
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Input::Text(text) => {
                if !geocoder.is_focused() {
                    eprintln!("Input is blurred; use :focus to type");
                    continue;
                }
                geocoder.on_change(text.as_str());
                if text.is_empty() {
                    geocoder.on_suggestions_clear_requested();
                } else {
                    geocoder.on_suggestions_fetch_requested(text);
                }
            }
            Input::Select(index) => {
                if let Err(e) = geocoder.select(index, SelectionMethod::Enter).await {
                    eprintln!("Error: {}", e);
                }
            }
            Input::Reverse(point) => match geocoder.reverse_geocode(point).await {
                Ok(true) => {}
                Ok(false) => println!("No address found"),
                Err(e) => eprintln!("Error: {}", e),
            },
            Input::Clear => {
                geocoder.clear();
                geocoder.on_suggestions_clear_requested();
            }
            Input::State => {
                let state = geocoder.state();
                println!(
                    "value: \"{}\" selected: {} suggestions: {} focused: {}",
                    state.value,
                    state.selected,
                    state.suggestions.len(),
                    geocoder.is_focused()
                );
            }
            Input::Focus => geocoder.focus(),
            Input::Blur => geocoder.blur(),
            Input::Help => print_help(),
            Input::Quit => break,
            Input::Invalid(message) => eprintln!("{}", message),
        }
    }

    geocoder.blur();
    watcher.abort();
    Ok(())
}
