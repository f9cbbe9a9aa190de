use std::path::PathBuf;

use crate::args::Args;

pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1500;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_LOG_DIR: &str = "logs";
/// Upper bound accepted for `--feedback-delay-ms` (one hour).
pub const MAX_FEEDBACK_DELAY_MS: u64 = 3_600_000;

/// Engine timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    /// How long feedback stays up before moving on.
    pub feedback_delay_ms: u64,
    /// Period of the running-clock tick.
    pub tick_interval_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurableBackend {
    /// `None` means the default file under the user's data directory,
    /// resolved when the store is opened.
    Sqlite(Option<PathBuf>),
    Memory,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub quiz: QuizConfig,
    pub questions_path: Option<PathBuf>,
    pub durable: DurableBackend,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Self {
        let durable = if args.memory {
            DurableBackend::Memory
        } else {
            DurableBackend::Sqlite(args.db)
        };

        Self {
            quiz: QuizConfig {
                feedback_delay_ms: args.feedback_delay_ms,
                ..QuizConfig::default()
            },
            questions_path: args.questions,
            durable,
            log_dir: args.log_dir,
        }
    }
}
