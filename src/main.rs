use anyhow::Context;
use clap::{Parser, Subcommand};
use sportswatch::prelude::*;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Event time reports and per-sport post aggregations
#[derive(Parser, Debug)]
#[command(name = "sportswatch")]
#[command(about = "Extract event times from schedule markup and count post languages and hashtags")]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one time range per event found in an HTML document
    Times {
        /// HTML document to scan
        file: PathBuf,

        /// Class marking a time element (default: bar)
        #[arg(long = "time-class")]
        time_class: Option<String>,

        /// Class marking the start-time child (default: bar-time)
        #[arg(long = "bar-class")]
        bar_class: Option<String>,
    },

    /// Count post languages and hashtags for each keyword
    Aggregate {
        /// Post records, as JSON Lines or a JSON array
        #[arg(long)]
        records: PathBuf,

        /// Directory for result files (default: ./output, or SPORTSWATCH_OUT_DIR env var)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pipeline kinds to run: langs, tags (default: both)
        #[arg(long = "kind", num_args = 0..)]
        kinds: Vec<String>,

        /// Keywords to filter by, replacing the configured list ("all" is always run)
        #[arg(short, long, num_args = 0..)]
        keywords: Vec<String>,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  times       Print one time range per event found in an HTML document");
    println!("  aggregate   Count post languages and hashtags for each keyword");
}

/// Builder seeded from the config file, if one was given
fn base_builder(config: Option<&PathBuf>) -> anyhow::Result<ConfigBuilder> {
    let mut builder = ConfigBuilder::new();
    if let Some(path) = config {
        let file = ConfigFile::load(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        builder = builder.file(file);
    }
    Ok(builder)
}

async fn run_times_command(config: Option<PathBuf>, cmd: Command) -> anyhow::Result<()> {
    let Command::Times {
        file,
        time_class,
        bar_class,
    } = cmd
    else {
        unreachable!()
    };

    let mut builder = base_builder(config.as_ref())?;
    if let Some(class) = time_class {
        builder = builder.time_class(class);
    }
    if let Some(class) = bar_class {
        builder = builder.bar_class(class);
    }
    let config = builder.build()?;

    let source = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read document: {}", file.display()))?;

    let lines = time_report(&source, &config.time_class, &config.bar_class)?;
    tracing::info!(file = %file.display(), events = lines.len(), "time report ready");

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &lines)?;
    Ok(())
}

async fn run_aggregate_command(config: Option<PathBuf>, cmd: Command) -> anyhow::Result<()> {
    let Command::Aggregate {
        records,
        out,
        kinds,
        keywords,
    } = cmd
    else {
        unreachable!()
    };

    let mut builder = base_builder(config.as_ref())?;

    // Flag first, then environment variable, then config file / default
    if let Some(out) = out {
        builder = builder.output_dir(out);
    } else if let Ok(dir) = std::env::var("SPORTSWATCH_OUT_DIR") {
        builder = builder.output_dir(dir);
    }

    if !kinds.is_empty() {
        builder = builder.kinds_str(&kinds[..])?;
    }
    if !keywords.is_empty() {
        builder = builder.keywords(keywords);
    }

    let config = builder.build()?;

    let store = load_records(&records)
        .await
        .with_context(|| format!("Failed to load records: {}", records.display()))?;
    tracing::info!(records = store.len(), "loaded post records");

    let mut sink = DirectorySink::create(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    run_all(&store, &mut sink, &config, |name, result| {
        println!("{}", summarize(name, result));
    })?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Some(cmd @ Command::Times { .. }) => run_times_command(args.config, cmd).await,
        Some(cmd @ Command::Aggregate { .. }) => run_aggregate_command(args.config, cmd).await,
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
