use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use pathquill::config::Config;
use pathquill::document::parser::to_json;
use pathquill::file::loader::{load_file, load_from_stdin, InputFormat};
use pathquill::querypath::{Paths, Resolver};

/// PathQuill - extract values from JSON and YAML documents
#[derive(Parser)]
#[command(name = "pathquill")]
#[command(version)]
#[command(about = "Extract values from JSON and YAML documents with dotted paths", long_about = None)]
struct Cli {
    /// Document to read (omit or use '-' to read from stdin)
    file: Option<String>,

    /// Path to extract, e.g. 'data.items[*].id'; repeat for several paths
    #[arg(short, long = "path")]
    paths: Vec<String>,

    /// Input format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Maximum nesting of wildcard/slice expansions (overrides the config file)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::load();

    // CLI flags override config values
    let format = cli.format.unwrap_or(config.input_format);
    let resolver = Resolver::with_max_depth(cli.max_depth.unwrap_or(config.max_depth));
    let pretty = config.pretty && !cli.compact;

    let document = match cli.file.as_deref() {
        None | Some("-") => load_from_stdin(format)?,
        Some(path) => load_file(path, format)?,
    };

    let output = match cli.paths.len() {
        0 => to_json(&document),
        1 => resolver
            .extract(&document, &Paths::from(cli.paths[0].as_str()))
            .to_json(),
        _ => resolver
            .extract(&document, &Paths::Many(cli.paths))
            .to_json(),
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to render output")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    stdout.flush()?;

    Ok(())
}
