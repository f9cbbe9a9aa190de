pub mod args;
pub mod config;
pub mod engine;
pub mod logging;
pub mod questions;
pub mod storage;
pub mod ui;
