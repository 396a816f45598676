//! Process start-up shared by the binaries.

use clap::Parser;
use env_logger::Env;

/// Parse command-line arguments.
///
/// Usage errors exit with status 1; `--help` and `--version` exit with 0.
pub fn parse_args<P: Parser>() -> P {
    P::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        std::process::exit(code)
    })
}

/// Log to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
