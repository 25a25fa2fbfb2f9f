//! Logger bootstrap for the demo binary and tests.
use env_logger::{Builder, Env};

/// Default filter: motion events at info, everything else at warn.
const QUIET_FILTER: &str = "warn,corral=info";
/// Verbose filter: per-agent registration and pruning at debug.
const VERBOSE_FILTER: &str = "info,corral=debug";

/// Initializes the global logger.
///
/// `verbose` lowers the crate's own threshold to debug, which surfaces
/// swallowed commands and pruned agents. `RUST_LOG` overrides either default.
pub fn init(verbose: bool) {
    let filter = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let mut builder = Builder::from_env(Env::default().default_filter_or(filter));
    builder.format_timestamp_millis();

    // A logger may already be installed by an earlier test; keep it.
    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
}
