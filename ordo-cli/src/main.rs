mod config;

use std::cmp::Ordering;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use ordo_core::{Order, Record, build_order, split_records, validate_records};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Profile, Settings};

/// Sort delimited lines by typed, composable keys.
#[derive(Parser, Debug)]
#[command(name = "ordo", version, about, long_about = None)]
struct Cli {
    #[arg(short, long, help = "Input file (defaults to stdin)")]
    input: Option<PathBuf>,

    #[arg(short, long, help = "Output file (defaults to stdout)")]
    output: Option<PathBuf>,

    #[arg(
        short = 'k',
        long = "key",
        value_name = "KEY",
        help = "Sort key FIELD[:TYPE][:FLAG...], e.g. 2:int:desc; repeat for tie-breakers"
    )]
    keys: Vec<String>,

    #[arg(
        short = 't',
        long,
        value_name = "DELIM",
        help = "Field delimiter: a single character, 'tab' or 'ws' (default)"
    )]
    delimiter: Option<String>,

    #[arg(short, long, help = "Reverse the whole ordering")]
    reverse: bool,

    #[arg(short, long, help = "Keep only the first of each run of equal lines")]
    unique: bool,

    #[arg(short, long, help = "Check that the input is already sorted")]
    check: bool,

    #[arg(
        long,
        value_name = "PATH",
        env = "ORDO_PROFILE",
        help = "TOML profile with delimiter, keys, reverse and unique"
    )]
    profile: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli)
}

fn init_tracing(verbose: u8) {
    let default_level = if verbose == 0 { "warn" } else { "debug" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn execute(cli: Cli) -> Result<()> {
    let profile = match &cli.profile {
        Some(path) => {
            debug!(path = %path.display(), "loading profile");
            Profile::load_from_file(path)?
        }
        None => Profile::default(),
    };
    let settings = Settings::resolve(
        profile,
        cli.delimiter.as_deref(),
        &cli.keys,
        cli.reverse,
        cli.unique,
    )?;
    debug!(?settings, "resolved settings");

    let source = read_input(cli.input.as_deref())?;
    let mut records = split_records(&source, settings.delimiter);
    validate_records(&records, &settings.keys)?;

    let mut order = build_order(&settings.keys);
    if settings.reverse {
        order = order.reversed();
    }
    debug!(?order, records = records.len(), "built ordering");

    if cli.check {
        return check_sorted(&order, &records, settings.unique);
    }

    order.sort(&mut records);
    if settings.unique {
        records.dedup_by(|next, kept| order.compare(kept, next) == Ordering::Equal);
    }
    info!(records = records.len(), "sorted input");

    let mut rendered = String::with_capacity(source.len());
    for record in &records {
        rendered.push_str(&record.raw);
        rendered.push('\n');
    }
    write_output(cli.output.as_deref(), rendered.as_bytes())
}

fn check_sorted(order: &Order<Record>, records: &[Record], strict: bool) -> Result<()> {
    let out_of_order = |ordering: Ordering| {
        ordering == Ordering::Greater || (strict && ordering == Ordering::Equal)
    };
    match records
        .windows(2)
        .find(|pair| out_of_order(order.compare(&pair[0], &pair[1])))
    {
        Some(pair) => Err(anyhow!(
            "disorder at line {}: {}",
            pair[1].line,
            pair[1].raw
        )),
        None => {
            info!(records = records.len(), "input is sorted");
            Ok(())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    let Some(path) = path else {
        io::stdout()
            .write_all(bytes)
            .context("failed to write stdout")?;
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}
