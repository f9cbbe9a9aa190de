use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_FEEDBACK_DELAY_MS, DEFAULT_LOG_DIR, MAX_FEEDBACK_DELAY_MS};

#[derive(Debug, Parser)]
#[command(name = "quiz-master", about = "Timed multiple-choice quiz in the terminal")]
pub struct Args {
    /// JSON question bank to use instead of the built-in questions
    #[arg(long, value_name = "PATH")]
    pub questions: Option<PathBuf>,

    /// SQLite file for the high score and statistics
    #[arg(long, value_name = "PATH", conflicts_with = "memory")]
    pub db: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long)]
    pub memory: bool,

    /// Milliseconds to show answer feedback before moving on
    #[arg(
        long,
        value_name = "MS",
        default_value_t = DEFAULT_FEEDBACK_DELAY_MS,
        value_parser = clap::value_parser!(u64).range(..=MAX_FEEDBACK_DELAY_MS)
    )]
    pub feedback_delay_ms: u64,

    /// Directory for log files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}
