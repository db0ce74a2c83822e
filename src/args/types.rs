use clap::{Parser, ValueEnum};
use serde_json::Value;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Sqlite,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Storage backend: memory or sqlite
    #[arg(
        short = 'd',
        long,
        value_name = "DATABASE_TYPE",
        value_enum,
        default_value = "sqlite"
    )]
    pub db_type: StorageKind,
    /// For sqlite, the filename (`:memory:` for a throwaway database). Ignored for memory.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME", default_value = "handicap.db")]
    pub db_name: String,
    #[arg(short = 'b', long, value_name = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind: String,
    #[arg(short = 'p', long, value_name = "PORT", default_value = "8081")]
    pub port: u16,
    /// Courses, players and rounds to load on startup.
    #[arg(
        long,
        value_name = "SEED_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub seed_json: Option<Value>,
    /// error, warn, info, debug or trace
    #[arg(
        long,
        value_name = "LOG_LEVEL",
        default_value = "info",
        value_parser = crate::args::validation::check_log_level
    )]
    pub log_level: log::LevelFilter,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_type: StorageKind,
    pub db_name: String,
    pub bind: String,
    pub port: u16,
    pub seed_json: Option<Value>,
    pub log_level: log::LevelFilter,
}
