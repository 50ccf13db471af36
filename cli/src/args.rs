use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fastlog_core::FastType;

#[derive(Parser, Debug)]
#[command(name = "fastlog", version, about = "Keep a log of your fasts on a fasting log server")]
pub struct Cli {
    /// Server origin, e.g. http://localhost:8080 (overrides FASTLOG_API_ORIGIN)
    #[arg(long, global = true)]
    pub origin: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show every fasting log, newest first
    List,
    /// Fetch one fasting log from the server
    Show { id: i64 },
    /// Log a new fast
    Add {
        /// Day of the fast (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// religious or intermittent
        #[arg(long = "type", default_value = "religious")]
        fast_type: FastType,
        /// Mark the fast as already completed
        #[arg(long)]
        completed: bool,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Change an existing fasting log; omitted fields keep their value
    Edit {
        id: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long = "type")]
        fast_type: Option<FastType>,
        /// true or false
        #[arg(long)]
        completed: Option<bool>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark a fast as completed
    Complete { id: i64 },
    /// Delete a fasting log
    Delete {
        id: i64,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}
