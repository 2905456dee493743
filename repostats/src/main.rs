//! # repostats
//!
//! A CLI tool showing which file types (or languages) make up a repository,
//! as a percentage breakdown with colored bars.
//!
//! ## Overview
//!
//! repostats is built on top of repostatslib. It fetches the recursive file
//! tree of a GitHub repository (trying `main`, then `master`), drops paths
//! matched by the ignore list, and sums blob sizes per extension.
//!
//! ## Features
//!
//! - **Ignore rules**: `.ext` suffix, `/folder`, or plain name rules, with a
//!   sensible default selection
//! - **Two strategies**: extension breakdown from the tree, or GitHub's own
//!   language statistics with `--languages`
//! - **Local repositories**: read a committed tree from disk with `--local`
//! - **Multiple output formats**: Colored table (default), JSON
//!
//! ## Usage
//!
//! ```bash
//! # Breakdown of a GitHub repository
//! repostats octocat/hello-world
//! repostats octocat hello-world
//!
//! # Ignore markdown, stop ignoring build/
//! repostats octocat/hello-world --ignore .md --unignore build
//!
//! # GitHub's language statistics instead of extensions
//! repostats rust-lang/cargo --languages
//!
//! # Current checkout, specific branch, top 5 only
//! repostats --local . --branch develop --top 5
//!
//! # Which ignore rules are active
//! repostats ignores --ignore .md
//! ```

use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use outstanding::{OutputMode, Theme};
use repostatslib::{
    ansi256_for, FilterConfig, GitHubClient, IgnoreList, LocalRepository, OrderBy, Ordering,
    RepoSource, StatsQuerySet, StatsSession, StatsTable, Strategy, COMMON_IGNORE_ITEMS,
    DEFAULT_BAR_WIDTH,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Include templates at compile time
const STATS_TABLE_TEMPLATE: &str = include_str!("../templates/stats_table.jinja");
const IGNORE_LIST_TEMPLATE: &str = include_str!("../templates/ignore_list.jinja");

/// Row data for template rendering
#[derive(Debug, Serialize)]
struct TemplateRow {
    label: String,
    bar: String,
    percentage: String,
    size: String,
}

/// Data context for stats table template
#[derive(Debug, Serialize)]
struct StatsTableContext {
    title: String,
    header: String,
    separator: String,
    rows: Vec<TemplateRow>,
    footer: String,
}

/// One line of the ignore catalogue
#[derive(Debug, Serialize)]
struct IgnoreItem {
    rule: String,
    active: bool,
    kind: &'static str,
}

/// Data context for ignore list template
#[derive(Debug, Serialize)]
struct IgnoreListContext {
    items: Vec<IgnoreItem>,
    active_count: usize,
}

/// Arguments shared by every command that builds an ignore list
fn ignore_args() -> Vec<Arg> {
    vec![
        Arg::new("ignore")
            .short('i')
            .long("ignore")
            .action(ArgAction::Append)
            .help("Add an ignore rule (.ext suffix, /folder, or name)"),
        Arg::new("unignore")
            .short('u')
            .long("unignore")
            .action(ArgAction::Append)
            .help("Remove an ignore rule from the selection"),
        Arg::new("no-default-ignores")
            .long("no-default-ignores")
            .action(ArgAction::SetTrue)
            .help("Start from an empty ignore list instead of the defaults"),
    ]
}

/// Arguments of the stats command
fn stats_args() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("target").help("Repository as OWNER/REPO, or the owner when REPO follows"),
        Arg::new("repo").help("Repository name"),
        Arg::new("branch")
            .short('b')
            .long("branch")
            .help("Branch or revision to read (default: main, then master)"),
        Arg::new("languages")
            .short('l')
            .long("languages")
            .action(ArgAction::SetTrue)
            .help("Use GitHub's language statistics instead of file extensions"),
        Arg::new("apply-ignore-to-languages")
            .long("apply-ignore-to-languages")
            .action(ArgAction::SetTrue)
            .help("Match ignore rules against language names with --languages"),
        Arg::new("include")
            .long("include")
            .action(ArgAction::Append)
            .help("Only count paths matching this glob pattern"),
        Arg::new("local")
            .long("local")
            .value_name("PATH")
            .help("Read the committed tree of a local git repository"),
        Arg::new("sort")
            .short('s')
            .long("sort")
            .value_parser(["bytes", "name"])
            .default_value("bytes")
            .help("Order rows by size or by name"),
        Arg::new("top")
            .short('t')
            .long("top")
            .value_parser(value_parser!(usize))
            .help("Show the N largest categories and fold the rest into (other)"),
        Arg::new("width")
            .short('w')
            .long("width")
            .value_parser(value_parser!(usize))
            .default_value("40")
            .help("Bar width in characters"),
    ];
    args.extend(ignore_args());
    args
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("repostats")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Per-extension byte breakdown of a GitHub repository")
        .args(stats_args())
        .subcommand(
            Command::new("stats")
                .about("Show repository statistics (default command)")
                .args(stats_args()),
        )
        .subcommand(
            Command::new("ignores")
                .about("List the ignore rule catalogue and the active selection")
                .args(ignore_args()),
        )
}

/// Build the ignore list from defaults and --ignore/--unignore
fn build_ignore_list(matches: &ArgMatches) -> IgnoreList {
    let mut list = if matches.get_flag("no-default-ignores") {
        IgnoreList::empty()
    } else {
        IgnoreList::default()
    };

    if let Some(rules) = matches.get_many::<String>("ignore") {
        for rule in rules {
            list.insert(rule.as_str());
        }
    }

    if let Some(rules) = matches.get_many::<String>("unignore") {
        for rule in rules {
            list.remove(rule);
        }
    }

    list
}

/// Build include filter from matches
fn build_include(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::permissive();

    if let Some(patterns) = matches.get_many::<String>("include") {
        for pattern in patterns {
            filter = filter.include(pattern)?;
        }
    }

    Ok(filter)
}

/// Split the positional arguments into owner and repository name
fn split_target(matches: &ArgMatches) -> (String, String) {
    let target = matches.get_one::<String>("target").map(|s| s.as_str());
    let repo = matches.get_one::<String>("repo").map(|s| s.as_str());

    match (target, repo) {
        (Some(owner), Some(name)) => (owner.to_string(), name.to_string()),
        (Some(slug), None) => match slug.split_once('/') {
            Some((owner, name)) => (owner.to_string(), name.to_string()),
            None => (slug.to_string(), String::new()),
        },
        (None, _) => (String::new(), String::new()),
    }
}

fn ordering_from(matches: &ArgMatches) -> Ordering {
    let by = matches
        .get_one::<String>("sort")
        .and_then(|s| s.parse::<OrderBy>().ok())
        .unwrap_or_default();
    match by {
        OrderBy::Bytes => Ordering::by_bytes(),
        OrderBy::Category => Ordering::by_category(),
    }
}

/// Whether bars should carry ANSI colors for this output mode
fn wants_color(mode: OutputMode) -> bool {
    match mode {
        OutputMode::Term => true,
        OutputMode::Auto => console::colors_enabled(),
        _ => false,
    }
}

/// Handler for stats command
fn stats_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let include = build_include(matches)?;

    let local = match matches.get_one::<String>("local") {
        Some(path) => Some(LocalRepository::open(path)?),
        None => None,
    };

    let mut session = match &local {
        Some(repo) => {
            let id = repo.repo_ref();
            StatsSession::new(id.owner, id.name)
        }
        None => {
            let (owner, name) = split_target(matches);
            StatsSession::new(owner, name)
        }
    };
    session.ignore_list = build_ignore_list(matches);
    session.reference = matches.get_one::<String>("branch").cloned();
    session.apply_ignore_to_languages = matches.get_flag("apply-ignore-to-languages");
    if matches.get_flag("languages") {
        session.strategy = Strategy::Languages;
    }

    let github;
    let source: &dyn RepoSource = match &local {
        Some(repo) => repo,
        None => {
            github = GitHubClient::from_env()?;
            &github
        }
    };

    let title = format!(
        "Statistics: {}/{}",
        session.username.trim(),
        session.repository.trim()
    );
    let stats = session.fetch(source, include)?;

    let top = matches.get_one::<usize>("top").copied();
    let width = matches
        .get_one::<usize>("width")
        .copied()
        .unwrap_or(DEFAULT_BAR_WIDTH);
    let queryset = StatsQuerySet::from_stats(stats, ordering_from(matches), top);
    let table = StatsTable::from_queryset(&queryset, width).with_title(title);

    // For JSON mode, return the table data
    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&table)?));
    }

    let context = build_stats_context(&table, wants_color(ctx.output_mode));
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Build StatsTableContext from a table, pre-padding every column
fn build_stats_context(table: &StatsTable, color: bool) -> StatsTableContext {
    let label_width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain(std::iter::once(table.headers[0].len()))
        .max()
        .unwrap_or(0);
    let size_width = table
        .rows
        .iter()
        .map(|r| r.size.len())
        .max()
        .unwrap_or(0)
        .max(table.headers[3].len());
    let bar_width = table
        .rows
        .first()
        .map(|r| r.bar.chars().count())
        .unwrap_or(0)
        .max(table.headers[1].len());

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let bar = if color {
                Style::new()
                    .color256(ansi256_for(&row.color))
                    .force_styling(true)
                    .apply_to(&row.bar)
                    .to_string()
            } else {
                row.bar.clone()
            };
            TemplateRow {
                label: format!("{:<width$}", row.label, width = label_width),
                bar,
                percentage: format!("{:>7}%", row.percentage),
                size: format!("{:>width$}", row.size, width = size_width),
            }
        })
        .collect();

    let header = format!(
        "{:<lw$} {:<bw$} {:>8} {:>sw$}",
        table.headers[0],
        table.headers[1],
        table.headers[2],
        table.headers[3],
        lw = label_width,
        bw = bar_width,
        sw = size_width
    );
    let separator = "-".repeat(header.chars().count());

    StatsTableContext {
        title: table.title.clone().unwrap_or_default(),
        header,
        separator,
        rows,
        footer: table.footer.clone(),
    }
}

fn rule_kind(rule: &str) -> &'static str {
    if rule.starts_with('.') {
        "suffix"
    } else if rule.starts_with('/') {
        "folder"
    } else {
        "name"
    }
}

/// Handler for ignores command
fn ignores_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let list = build_ignore_list(matches);

    let mut items: Vec<IgnoreItem> = COMMON_IGNORE_ITEMS
        .iter()
        .map(|rule| IgnoreItem {
            rule: rule.to_string(),
            active: list.contains(rule),
            kind: rule_kind(rule),
        })
        .collect();

    // Active rules that are not part of the catalogue go last
    for rule in list.rules() {
        if !COMMON_IGNORE_ITEMS.contains(&rule.as_str()) {
            items.push(IgnoreItem {
                rule: rule.clone(),
                active: true,
                kind: rule_kind(rule),
            });
        }
    }

    let context = IgnoreListContext {
        active_count: list.len(),
        items,
    };
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("title", Style::new().bold())
        .add("header", Style::new().bold())
        .add("category", Style::new().cyan())
        .add("total", Style::new().bold())
        .add("active", Style::new().green())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let cmd = build_command();
    let theme = create_theme();

    // Build the outstanding app with command handlers and run
    let result = App::builder()
        .theme(theme)
        .command("stats", stats_handler, STATS_TABLE_TEMPLATE)
        .command("ignores", ignores_handler, IGNORE_LIST_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if !output.is_empty() {
                if output.starts_with("Error:") {
                    eprintln!("{}", output);
                    return ExitCode::FAILURE;
                }
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => ExitCode::SUCCESS,
        RunResult::NoMatch(matches) => {
            // Root command without a subcommand runs stats
            let output_mode = matches
                .get_one::<String>("_output_mode")
                .map(|s| match s.as_str() {
                    "json" => OutputMode::Json,
                    "text" => OutputMode::Text,
                    "term-debug" => OutputMode::TermDebug,
                    "term" => OutputMode::Term,
                    _ => OutputMode::Auto,
                })
                .unwrap_or(OutputMode::Auto);

            let ctx = CommandContext {
                output_mode,
                command_path: vec![],
            };

            match stats_handler(&matches, &ctx) {
                Ok(Output::Render(value)) => {
                    if output_mode.is_structured() {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&value).unwrap_or_default()
                        );
                    } else {
                        let theme = create_theme();
                        match outstanding::render(STATS_TABLE_TEMPLATE, &value, &theme) {
                            Ok(output) => println!("{}", output),
                            Err(e) => {
                                eprintln!("Error: {e}");
                                return ExitCode::FAILURE;
                            }
                        }
                    }
                    ExitCode::SUCCESS
                }
                Ok(Output::Silent) => ExitCode::SUCCESS,
                Ok(Output::Binary { .. }) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
