use serde_json::json;
use tracing::warn;

use crate::engine::{run_average_query, run_detail_lookup, QueryOptions};
use crate::report::{self, Reply};
use crate::table::FceTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `fce <courseIDs...> [semesters] [threshold]`
    Fce(Vec<String>),
    /// `course <courseID>`; extra arguments are ignored.
    Course(Option<String>),
    Help,
    Unknown(String),
}

const HELP: &str = "Commands: `&fce [courseIDs...] [opt: # sem] [opt: # / prop. responses]`, `&course <courseID>`";

impl Command {
    pub fn from_parts(name: &str, mut args: Vec<String>) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "fce" => Command::Fce(args),
            "course" => Command::Course((!args.is_empty()).then(|| args.swap_remove(0))),
            "help" => Command::Help,
            other => Command::Unknown(other.to_string()),
        }
    }

    /// Parses a chat line such as `&fce 21127 2`. Lines without the prefix are not commands.
    pub fn parse_line(line: &str, prefix: char) -> Option<Self> {
        let rest = line.trim().strip_prefix(prefix)?;
        let mut words = rest.split_whitespace();
        let name = words.next()?;
        Some(Self::from_parts(name, words.map(str::to_string).collect()))
    }
}

pub fn reply(table: &FceTable, options: &QueryOptions, command: &Command) -> Reply {
    match command {
        Command::Fce(args) => match run_average_query(table, args.as_slice(), options) {
            Ok(result) => report::average_reply(&result),
            Err(err) => {
                warn!(?args, error = %err, "average query rejected");
                report::query_error_reply(&err)
            }
        },
        Command::Course(token) => {
            match run_detail_lookup(table, token.as_deref().unwrap_or_default()) {
                Ok(detail) => report::detail_reply(&detail),
                Err(err) => {
                    warn!(?token, error = %err, "course lookup rejected");
                    report::detail_error_reply(&err)
                }
            }
        }
        Command::Help => Reply::text(HELP),
        Command::Unknown(name) => Reply::text(format!("Unknown command `{name}`. {HELP}")),
    }
}

/// Same as [`reply`], but returns the structured result as JSON.
pub fn reply_json(
    table: &FceTable,
    options: &QueryOptions,
    command: &Command,
) -> serde_json::Result<String> {
    let value = match command {
        Command::Fce(args) => match run_average_query(table, args.as_slice(), options) {
            Ok(result) => serde_json::to_value(result)?,
            Err(err) => json!({ "error": err.to_string() }),
        },
        Command::Course(token) => {
            match run_detail_lookup(table, token.as_deref().unwrap_or_default()) {
                Ok(detail) => serde_json::to_value(detail)?,
                Err(err) => json!({ "error": err.to_string() }),
            }
        }
        Command::Help => json!({ "help": HELP }),
        Command::Unknown(name) => json!({ "error": format!("unknown command {name}") }),
    };
    serde_json::to_string_pretty(&value)
}
