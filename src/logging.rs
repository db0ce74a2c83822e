use log::{LevelFilter, SetLoggerError};

/// `env_logger` builder filtered at `level`.
#[must_use]
pub fn builder(level: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder
}

/// Installs `env_logger` at `level`; `RUST_LOG` directives refine it.
///
/// # Errors
/// Returns an error if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    builder(level).parse_default_env().try_init()
}
