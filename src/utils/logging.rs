//! Logger setup
//!
//! `RUST_LOG` always wins. Without it the level is `info`, or `debug` when
//! `--verbose` is given.

use env_logger::{Builder, Env};
use std::io::Write;

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "stampcard_cli=debug,info"
    } else {
        "info"
    }
}

/// Install the global logger; a second call is ignored
pub fn init_logging(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let result = Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialised");
    }
}
