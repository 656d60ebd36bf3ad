#![warn(clippy::all)]
#![windows_subsystem = "windows"]

use std::process::ExitCode;

use batshim::launch_hidden;
use batshim::DefaultLauncher;
use batshim::ScriptPath;

fn main() -> ExitCode {
    // without a log file we still launch
    let _guard = batshim::logging::setup(env!("CARGO_PKG_NAME")).ok();

    let result = ScriptPath::resolve_current()
        .and_then(|script| launch_hidden(&DefaultLauncher::default(), &script));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
