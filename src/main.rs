use anyhow::Result;
use clap::Parser;
use tracing::info;

use quiz_master::{
    args::Args,
    config::AppConfig,
    engine::{QuizEngine, SystemClock},
    logging::init_logging,
    questions::QuestionBank,
    storage::{MemoryStore, Storage, sqlite::open_durable_store},
    ui::run_ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::from_args(args);
    let _guard = init_logging(&config.log_dir)?;

    info!("quiz-master starting");

    let bank = match &config.questions_path {
        Some(path) => QuestionBank::from_json_file(path)?,
        None => QuestionBank::builtin(),
    };
    info!("Loaded {} questions", bank.len());

    let durable = open_durable_store(&config.durable).await;
    let storage = Storage::new(durable, Box::new(MemoryStore::new()));

    let engine = QuizEngine::new(bank, storage, Box::new(SystemClock), config.quiz);

    run_ui(engine)
}
