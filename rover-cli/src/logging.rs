//! Logging setup shared by both binaries, mirroring the
//! timer-plus-thread-ids subscriber configuration used throughout this
//! codebase's other command-line entry points.

use std::time::Instant;

use tracing_subscriber::fmt::time::Uptime;

pub fn init_logging(level: tracing::Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_timer(Uptime::from(Instant::now()))
        .with_thread_ids(true)
        .with_max_level(level)
        .finish();
    // a second call (e.g. from a test harness) is harmless; the first
    // subscriber installed wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
