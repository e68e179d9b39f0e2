//! Command-line interface for taglink
//! Builds the class index page and links hand-written pages against a Doxygen tag file.
//!
//! Usage:
//!   taglink index [--layout `<file>`] [--prefix `<prefix>`] [-o `<file>`]   - Generate the index page
//!   taglink rewrite                                                     - Rewrite the configured source tree
//!   taglink rewrite `<dir>` [`<out-dir>`]                                  - Rewrite a directory tree
//!   taglink rewrite `<file>` [`<out-file>`]                                - Rewrite a single page
//!
//! Settings come from the embedded defaults, `./taglink.toml` when present, `--config`, and
//! finally the flags above.

mod commands;

use clap::{Arg, ArgAction, ArgMatches, Command};
use taglink_config::{Loader, TaglinkConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn build_cli() -> Command {
    Command::new("taglink")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Links hand-written docs to Doxygen-generated class pages")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over ./taglink.toml and the defaults"),
        )
        .arg(
            Arg::new("tag-file")
                .long("tag-file")
                .short('t')
                .global(true)
                .help("Doxygen tag file to index (default: doxygen/cinder.tag)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("index")
                .about("Generate the class index page from a layout file")
                .arg(
                    Arg::new("layout")
                        .long("layout")
                        .short('l')
                        .help("Layout file listing categories and classes"),
                )
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .short('p')
                        .help("Prefix prepended to every class page path"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Where to write the index page"),
                )
                .arg(
                    Arg::new("omit-unresolved")
                        .long("omit-unresolved")
                        .action(ArgAction::SetTrue)
                        .help("Leave out entries whose class is not in the tag file"),
                ),
        )
        .subcommand(
            Command::new("rewrite")
                .about("Turn marker elements in hand-written pages into links")
                .arg(
                    Arg::new("input")
                        .help("Page or directory to rewrite (default: rewrite.source_dir)")
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .help("Output page or directory (default: rewrite.output_dir)")
                        .index(2),
                )
                .arg(
                    Arg::new("link-base")
                        .long("link-base")
                        .short('b')
                        .help("Path prepended to every resolved class page"),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_count("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let result = match matches.subcommand() {
        Some(("index", _)) => commands::handle_index_command(&config),
        Some(("rewrite", sub)) => commands::handle_rewrite_command(
            &config,
            sub.get_one::<String>("input").map(String::as_str),
            sub.get_one::<String>("output").map(String::as_str),
        ),
        _ => {
            // subcommand_required makes clap reject this before we get here
            let _ = build_cli().print_help();
            std::process::exit(2);
        }
    };

    match result {
        Ok(commands::Outcome::Success) => {}
        Ok(commands::Outcome::PartialFailure) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stdout; `-v` flags raise the level from WARN.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install logger: {}", e);
    }
}

/// Layer defaults, `./taglink.toml`, `--config` and the command's flags.
fn load_config(matches: &ArgMatches) -> Result<TaglinkConfig, String> {
    let mut loader = Loader::for_project(".");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let mut overrides: Vec<(&str, String)> = Vec::new();
    if let Some(tag_file) = matches.get_one::<String>("tag-file") {
        overrides.push(("index.tag_file", tag_file.clone()));
    }
    match matches.subcommand() {
        Some(("index", sub)) => {
            if let Some(layout) = sub.get_one::<String>("layout") {
                overrides.push(("generate.layout_file", layout.clone()));
            }
            if let Some(prefix) = sub.get_one::<String>("prefix") {
                overrides.push(("generate.link_prefix", prefix.clone()));
            }
            if let Some(output) = sub.get_one::<String>("output") {
                overrides.push(("generate.output", output.clone()));
            }
            if sub.get_flag("omit-unresolved") {
                overrides.push(("generate.unresolved", "omit".to_string()));
            }
        }
        Some(("rewrite", sub)) => {
            if let Some(base) = sub.get_one::<String>("link-base") {
                overrides.push(("rewrite.link_base", base.clone()));
            }
        }
        _ => {}
    }

    loader
        .with_overrides(overrides)
        .and_then(Loader::build)
        .map_err(|e| e.to_string())
}
