use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod args;
mod course_id;
mod dispatch;
mod engine;
mod error;
mod lookup;
mod models;
mod report;
mod segment;
mod table;

use dispatch::Command;
use engine::QueryOptions;
use segment::Segmentation;
use table::FceTable;

#[derive(Parser)]
#[command(name = "fce-query")]
#[command(about = "Course workload averages and course details from FCE data", long_about = None)]
struct Cli {
    /// FCE table to load
    #[arg(long, env = "FCE_CSV", default_value = "fce.csv", global = true)]
    csv: PathBuf,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    /// How rows are split into semesters
    #[arg(long, value_enum, default_value_t = Segmentation::Contiguous, global = true)]
    segmentation: Segmentation,
    /// Semesters averaged when a query gives no count
    #[arg(long, default_value_t = aggregate::DEFAULT_DEPTH, global = true)]
    default_depth: usize,
    /// Print structured JSON instead of chat-formatted text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average weekly hours for one or more courses
    Fce {
        /// Course IDs, then optional semester count and threshold
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Details of a single course
    Course { course_id: String },
    /// Answer prefixed command lines read from stdin
    Shell {
        #[arg(long, default_value_t = '&')]
        prefix: char,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => log_filter(&cli.log_level),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    if let Some(err) = rejected {
        warn!(level = %cli.log_level, error = %err, "invalid --log-level, logging at info");
    }

    let table = FceTable::from_path(&cli.csv)?;
    info!(rows = table.len(), path = %cli.csv.display(), "loaded FCE table");
    if table.is_empty() {
        warn!("FCE table has no rows; every query will report the course as not found");
    }

    let options = QueryOptions {
        default_depth: cli.default_depth,
        segmentation: cli.segmentation,
    };

    match cli.command {
        Commands::Fce { tokens } => {
            println!("{}", respond(&table, &options, &Command::Fce(tokens), cli.json)?);
        }
        Commands::Course { course_id } => {
            let command = Command::Course(Some(course_id));
            println!("{}", respond(&table, &options, &command, cli.json)?);
        }
        Commands::Shell { prefix } => {
            run_shell(Arc::new(table), options, prefix, cli.json).await?;
        }
    }

    Ok(())
}

/// Parses `--log-level`, falling back to `info` when the directive is invalid.
fn log_filter(level: &str) -> (EnvFilter, Option<ParseError>) {
    match level.parse::<EnvFilter>() {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    }
}

fn respond(
    table: &FceTable,
    options: &QueryOptions,
    command: &Command,
    json: bool,
) -> anyhow::Result<String> {
    if json {
        dispatch::reply_json(table, options, command).context("failed to encode reply as JSON")
    } else {
        Ok(dispatch::reply(table, options, command).render())
    }
}

/// Reads chat lines until EOF. Each command runs on the blocking pool against
/// the shared table; replies are written in input order.
async fn run_shell(
    table: Arc<FceTable>,
    options: QueryOptions,
    prefix: char,
    json: bool,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let Some(command) = Command::parse_line(&line, prefix) else {
            continue;
        };

        let table = Arc::clone(&table);
        let output =
            tokio::task::spawn_blocking(move || respond(&table, &options, &command, json))
                .await
                .context("command task failed")??;

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        handled += 1;
    }

    info!(handled, "stdin closed");
    Ok(())
}
