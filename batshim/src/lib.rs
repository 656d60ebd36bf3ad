#![warn(clippy::all, clippy::nursery, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::path::PathBuf;

use lazy_static::lazy_static;

pub mod error;
pub mod launcher;
pub mod logging;
pub mod script_path;
#[cfg(windows)]
pub mod windows_api;

pub use error::LaunchError;
pub use launcher::launch_console;
pub use launcher::launch_hidden;
pub use launcher::CommandLauncher;
pub use launcher::DefaultLauncher;
pub use launcher::ProcessLauncher;
#[cfg(windows)]
pub use launcher::Win32Launcher;
pub use script_path::ScriptPath;

lazy_static! {
    pub static ref LOG_DIR: PathBuf = std::env::var_os("BATSHIM_LOG_DIR").map_or_else(
        || dirs::data_local_dir().map_or_else(std::env::temp_dir, |dir| dir.join("batshim")),
        PathBuf::from,
    );
}
