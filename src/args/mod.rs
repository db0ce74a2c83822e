use clap::Parser;

pub mod database;
pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, StorageKind};

#[must_use]
pub fn args_checks() -> CleanArgs {
    CleanArgs::new(Args::parse())
}

impl CleanArgs {
    #[must_use]
    pub fn new(args: Args) -> Self {
        CleanArgs {
            db_type: args.db_type,
            db_name: args.db_name.trim().to_string(),
            bind: args.bind,
            port: args.port,
            seed_json: args.seed_json,
            log_level: args.log_level,
        }
    }
}
