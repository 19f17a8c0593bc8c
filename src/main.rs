//! pubdiff CLI - pinned-library change reporter for pubspec.lock
//!
//! Usage: pubdiff <COMMAND>
//!
//! Commands:
//!   diff   Compare two lock snapshots and report tracked-library changes
//!   parse  Display the tracked libraries of a single lock document

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pubdiff::config::{Config, ConfigWarning};
use pubdiff::report::ReportFormat;
use pubdiff::source::LockSource;
use pubdiff::{extract, render_json, render_markdown, render_text};

/// pubdiff - pinned-library change reporter for pubspec.lock
#[derive(Parser, Debug)]
#[command(name = "pubdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a pubdiff.toml (defaults to ./pubdiff.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two lock snapshots and report tracked-library changes
    Diff {
        /// Libraries to track (comma separated; overrides config)
        #[arg(short, long, value_delimiter = ',')]
        libraries: Vec<String>,

        /// Lock file path inside the repository
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Git revision providing the base snapshot
        #[arg(long, conflicts_with = "base_file")]
        base_ref: Option<String>,

        /// File providing the base snapshot
        #[arg(long)]
        base_file: Option<PathBuf>,

        /// Git revision providing the updated snapshot
        #[arg(long, conflicts_with = "updated_file")]
        updated_ref: Option<String>,

        /// File providing the updated snapshot (defaults to the lock path)
        #[arg(long)]
        updated_file: Option<PathBuf>,

        /// Report format: text, markdown or json
        #[arg(short, long)]
        format: Option<String>,

        /// Warning line included in markdown reports when changes exist
        #[arg(long)]
        warning_text: Option<String>,

        /// Emit a report even when no changes were detected
        #[arg(long)]
        always: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a lock document and display the tracked libraries
    Parse {
        /// Libraries to track (comma separated; overrides config)
        #[arg(short, long, value_delimiter = ',')]
        libraries: Vec<String>,

        /// Lock file to read (defaults to the configured lock path)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Git revision to read the lock file from
        #[arg(long)]
        r#ref: Option<String>,

        /// Emit records as JSON, one per line
        #[arg(long)]
        json: bool,
    },
}

/// Resolved inputs for the diff command
struct DiffOptions {
    libraries: Vec<String>,
    path: Option<PathBuf>,
    base_ref: Option<String>,
    base_file: Option<PathBuf>,
    updated_ref: Option<String>,
    updated_file: Option<PathBuf>,
    format: Option<String>,
    warning_text: Option<String>,
    always: bool,
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Diff {
            libraries,
            path,
            base_ref,
            base_file,
            updated_ref,
            updated_file,
            format,
            warning_text,
            always,
            output,
        } => cmd_diff(
            cli.config.as_deref(),
            DiffOptions {
                libraries,
                path,
                base_ref,
                base_file,
                updated_ref,
                updated_file,
                format,
                warning_text,
                always,
                output,
            },
        ),
        Commands::Parse {
            libraries,
            source,
            r#ref,
            json,
        } => cmd_parse(cli.config.as_deref(), libraries, source, r#ref, json),
    }
}

fn cmd_diff(config_path: Option<&Path>, opts: DiffOptions) -> Result<()> {
    let config = load_config(config_path)?;

    let libraries = resolve_libraries(opts.libraries, &config)?;
    let lock_path = opts
        .path
        .unwrap_or_else(|| PathBuf::from(&config.lock.path));

    let base_source = match (opts.base_ref, opts.base_file) {
        (Some(revision), None) => LockSource::GitRev {
            revision,
            path: lock_path.clone(),
        },
        (None, Some(file)) => LockSource::File(file),
        _ => match &config.diff.base {
            Some(revision) => LockSource::GitRev {
                revision: revision.clone(),
                path: lock_path.clone(),
            },
            None => anyhow::bail!(
                "no base snapshot: pass --base-ref or --base-file, or set [diff].base in pubdiff.toml"
            ),
        },
    };

    let updated_source = match (opts.updated_ref, opts.updated_file) {
        (Some(revision), None) => LockSource::GitRev {
            revision,
            path: lock_path.clone(),
        },
        (None, Some(file)) => LockSource::File(file),
        _ => LockSource::File(lock_path),
    };

    let base_snapshot = read_snapshot(&base_source, &libraries, "base")?;
    let updated_snapshot = read_snapshot(&updated_source, &libraries, "updated")?;

    let changes = pubdiff::diff(&libraries, &base_snapshot, &updated_snapshot);

    if changes.is_empty() && !(opts.always || config.report.always) {
        return Ok(());
    }

    let format = opts
        .format
        .as_deref()
        .or(config.report.format.as_deref())
        .map(str::parse::<ReportFormat>)
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let warning_text = opts.warning_text.or(config.report.warning_text);

    let report = match format {
        ReportFormat::Markdown => render_markdown(&libraries, &changes, warning_text.as_deref()),
        ReportFormat::Text => render_text(&changes),
        ReportFormat::Json => {
            let mut json = render_json(&changes)?;
            json.push('\n');
            json
        }
    };

    match opts.output {
        Some(path) => std::fs::write(&path, &report)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => print!("{report}"),
    }

    Ok(())
}

fn cmd_parse(
    config_path: Option<&Path>,
    libraries: Vec<String>,
    source: Option<PathBuf>,
    revision: Option<String>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let libraries = resolve_libraries(libraries, &config)?;
    let lock_path = source.unwrap_or_else(|| PathBuf::from(&config.lock.path));

    let lock_source = match revision {
        Some(revision) => LockSource::GitRev {
            revision,
            path: lock_path,
        },
        None => LockSource::File(lock_path),
    };

    let snapshot = read_snapshot(&lock_source, &libraries, "requested")?;

    if json {
        for record in snapshot.records() {
            println!("{}", serde_json::to_string(record)?);
        }
    } else {
        println!("Found {} tracked libraries in {}:", snapshot.len(), lock_source);
        for record in snapshot.records() {
            println!();
            println!("{} {}", record.name, record.version);
            for (key, value) in &record.description {
                println!("    {key}: {value}");
            }
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let (config, warnings) = match config_path {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            (config.with_env_overrides(), warnings)
        }
        None => {
            let cwd = std::env::current_dir()?;
            Config::load_or_default(&cwd)?
        }
    };

    report_config_warnings(&warnings);
    Ok(config)
}

fn report_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("warning: unknown config key '{}'", warning.key);
    }
}

fn resolve_libraries(cli_libraries: Vec<String>, config: &Config) -> Result<Vec<String>> {
    let libraries = if cli_libraries.is_empty() {
        config.libraries.clone()
    } else {
        cli_libraries
    };

    if libraries.is_empty() {
        anyhow::bail!(
            "no libraries to track: pass --libraries or set `libraries` in pubdiff.toml"
        );
    }

    Ok(libraries)
}

fn read_snapshot(
    source: &LockSource,
    libraries: &[String],
    side: &str,
) -> Result<pubdiff::Snapshot> {
    let text = source
        .read()
        .with_context(|| format!("reading {side} lock file from {source}"))?;

    extract(&text, libraries).with_context(|| format!("parsing {side} lock file ({source})"))
}
