use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

use crate::LOG_DIR;

/// Install `color_eyre`, a file-only `tracing` subscriber writing to
/// `<LOG_DIR>/<name>.log`, and a panic hook that records panics as events.
///
/// Nothing is written to the console. The returned guard must be held until
/// the program exits so that buffered lines are flushed.
pub fn setup(name: &str) -> Result<WorkerGuard> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1");
    }

    color_eyre::install()?;

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    std::fs::create_dir_all(&*LOG_DIR)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(format!("{name}.log"))
        .build(&*LOG_DIR)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(non_blocking)
            .with_ansi(false)
            .finish(),
    )?;

    // https://github.com/tokio-rs/tracing/blob/master/examples/examples/panic_hook.rs
    std::panic::set_hook(Box::new(|panic| {
        if let Some(location) = panic.location() {
            tracing::error!(
                message = %panic,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            tracing::error!(message = %panic);
        }
    }));

    Ok(guard)
}
