//! Lint, summarize, and generate point-release notes written in reStructuredText.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, command, value_parser};
use miette::Result;
use relnotes_document::Version;
use tracing::{Level, debug};

use crate::run_type::RunType;

mod command;
mod config;
mod fs;
mod integrations;
mod run_type;

/// Parse the command line, then run the chosen subcommand.
pub async fn run() -> Result<()> {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));
    let config = config::load()?;

    match matches.subcommand() {
        Some(("lint", args)) => {
            let patterns: Vec<String> = args
                .get_many::<String>("files")
                .into_iter()
                .flatten()
                .cloned()
                .collect();
            let fix = args
                .get_flag("fix")
                .then(|| RunType::new(args.get_flag("dry-run"), ()));
            command::lint::run(&patterns, fix, &config)?;
        }
        Some(("show", args)) => {
            let path = required::<PathBuf>(args, "file")?;
            command::show::run(&path, args.get_flag("json"), &config)?;
        }
        Some(("rules", _)) => command::rules::run(&config),
        Some(("authors", args)) => {
            let from = required::<String>(args, "from")?;
            let to = required::<String>(args, "to")?;
            command::authors::run(&from, &to, &config)?;
        }
        Some(("lists", args)) => {
            let version = required::<Version>(args, "version")?;
            command::lists::run(
                &version,
                args.get_one::<String>("milestone").map(String::as_str),
                args.get_one::<String>("token").map(String::as_str),
                &config,
            )
            .await?;
        }
        Some(("generate", args)) => {
            let options = command::generate::Options {
                version: required(args, "version")?,
                from: required(args, "from")?,
                to: required(args, "to")?,
                summary: args.get_one::<String>("summary").cloned(),
                caveats: args
                    .get_many::<String>("caveat")
                    .into_iter()
                    .flatten()
                    .cloned()
                    .collect(),
                output: args.get_one::<PathBuf>("output").cloned(),
                milestone: args.get_one::<String>("milestone").cloned(),
                token: args.get_one::<String>("token").cloned(),
                force: args.get_flag("force"),
            };
            let run_type = RunType::new(args.get_flag("dry-run"), ());
            command::generate::run(options, run_type, &config).await?;
        }
        other => debug!("Nothing to do for {other:?}"),
    }
    Ok(())
}

/// Clap enforces required arguments, this only turns a mismatch into an error instead of a panic.
fn required<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> Result<T> {
    args.get_one::<T>(id)
        .cloned()
        .ok_or_else(|| miette::miette!("Missing argument {id}"))
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn build_cli() -> Command {
    command!()
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Print extra information, useful for debugging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("lint")
                .about("Check release notes for mistakes")
                .arg(
                    Arg::new("files")
                        .help("Release notes files, or glob patterns like `doc/release/1.5.*-notes.rst`")
                        .value_name("FILES")
                        .required(true)
                        .num_args(1..),
                )
                .arg(
                    Arg::new("fix")
                        .long("fix")
                        .help("Correct heading adornments and the number of contributors in place")
                        .action(ArgAction::SetTrue),
                )
                .arg(dry_run().requires("fix")),
        )
        .subcommand(
            Command::new("show")
                .about("Summarize a release notes file")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print everything that was read, as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("rules").about("List the lint rules and the level each one runs at"))
        .subcommand(
            Command::new("authors")
                .about("Print the Authors section for a range of Git history")
                .arg(
                    Arg::new("from")
                        .value_name("FROM")
                        .help("The previous release, usually its tag")
                        .required(true),
                )
                .arg(
                    Arg::new("to")
                        .value_name("TO")
                        .help("The last commit of this release")
                        .default_value("HEAD"),
                ),
        )
        .subcommand(
            Command::new("lists")
                .about("Print the closed issues and merged pull requests of a GitHub milestone")
                .arg(version())
                .arg(milestone())
                .arg(token()),
        )
        .subcommand(
            Command::new("generate")
                .about("Write the release notes for a new release")
                .arg(version())
                .arg(from())
                .arg(to())
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .help("The first paragraph, defaults to the usual one for a point release"),
                )
                .arg(
                    Arg::new("caveat")
                        .long("caveat")
                        .help("A paragraph after the summary, can be repeated")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Where to write, defaults to <directory>/<VERSION>-notes.rst")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(milestone())
                .arg(token())
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Replace the output file if it already exists")
                        .action(ArgAction::SetTrue),
                )
                .arg(dry_run()),
        )
}

fn dry_run() -> Arg {
    Arg::new("dry-run")
        .long("dry-run")
        .help("Don't write any files, only show what would change")
        .action(ArgAction::SetTrue)
}

fn version() -> Arg {
    Arg::new("version")
        .value_name("VERSION")
        .help("The version being released, like 1.5.2")
        .required(true)
        .value_parser(value_parser!(Version))
}

fn from() -> Arg {
    Arg::new("from")
        .long("from")
        .value_name("REV")
        .help("The previous release, usually its tag")
        .required(true)
}

fn to() -> Arg {
    Arg::new("to")
        .long("to")
        .value_name("REV")
        .help("The last commit of this release")
        .default_value("HEAD")
}

fn milestone() -> Arg {
    Arg::new("milestone")
        .long("milestone")
        .help("The GitHub milestone, defaults to the version")
}

fn token() -> Arg {
    Arg::new("token")
        .long("token")
        .help("A GitHub token, anonymous requests are heavily rate limited")
        .env("GITHUB_TOKEN")
        .hide_env_values(true)
}
