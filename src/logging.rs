// src/logging.rs

//! Log setup. The level comes from `RUST_LOG` (e.g. `RUST_LOG=stockbrokr=trace` to see
//! every live-total recompute) and defaults to `info`.

use env_logger::Env;

pub fn init_logging() {
    // try_init so tests and the binary can both call this without panicking
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
