#![warn(clippy::all)]

use std::process::ExitCode;

use batshim::launch_console;
use batshim::ScriptPath;

fn main() -> ExitCode {
    let _guard = batshim::logging::setup(env!("CARGO_PKG_NAME")).ok();

    match ScriptPath::resolve_current() {
        Ok(script) => launch_console(&script),
        Err(error) => tracing::warn!("{error}"),
    }

    ExitCode::SUCCESS
}
