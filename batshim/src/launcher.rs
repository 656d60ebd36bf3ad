#[cfg(windows)]
use std::ffi::OsStr;
use std::process::Child;
use std::process::Command;

use crate::LaunchError;
use crate::ScriptPath;

#[cfg(windows)]
use crate::windows_api::OwnedProcess;
#[cfg(windows)]
use crate::windows_api::WindowsApi;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Host capability for starting a script without a window and waiting on it
pub trait ProcessLauncher {
    type Handle;

    fn start_hidden(&self, script: &ScriptPath) -> Result<Self::Handle, LaunchError>;

    /// Block until the process behind `handle` exits, returning its exit code
    /// if the host reports one. Consumes the handle, so any OS resources it
    /// holds are released once this returns.
    fn wait(&self, handle: Self::Handle) -> Result<Option<i32>, LaunchError>;
}

/// Launches through `CreateProcessW` with a hidden startup window
#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Launcher;

#[cfg(windows)]
impl ProcessLauncher for Win32Launcher {
    type Handle = OwnedProcess;

    fn start_hidden(&self, script: &ScriptPath) -> Result<Self::Handle, LaunchError> {
        WindowsApi::create_hidden_process(OsStr::new(script.as_str()))
    }

    fn wait(&self, process: Self::Handle) -> Result<Option<i32>, LaunchError> {
        WindowsApi::wait_for_process(&process)?;
        WindowsApi::exit_code_process(&process).map(Some)
    }
}

/// Launches through [`std::process::Command`]
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandLauncher;

impl ProcessLauncher for CommandLauncher {
    type Handle = Child;

    fn start_hidden(&self, script: &ScriptPath) -> Result<Self::Handle, LaunchError> {
        let mut command = Command::new(script);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        command
            .spawn()
            .map_err(|error| LaunchError::create_process(&error))
    }

    fn wait(&self, mut child: Self::Handle) -> Result<Option<i32>, LaunchError> {
        child
            .wait()
            .map(|status| status.code())
            .map_err(|error| LaunchError::wait(&error))
    }
}

#[cfg(windows)]
pub type DefaultLauncher = Win32Launcher;
#[cfg(not(windows))]
pub type DefaultLauncher = CommandLauncher;

/// Start `script` hidden and block until it has exited.
///
/// Only a failure to start the script is an error. The script's own exit code
/// and any failure while waiting are logged and otherwise ignored.
#[tracing::instrument(skip_all, fields(script = %script, directory = script.directory()))]
pub fn launch_hidden<L: ProcessLauncher>(
    launcher: &L,
    script: &ScriptPath,
) -> Result<(), LaunchError> {
    let handle = launcher.start_hidden(script)?;
    tracing::info!("started script, waiting for it to exit");

    match launcher.wait(handle) {
        Ok(Some(code)) => tracing::info!("script exited with code {code}"),
        Ok(None) => tracing::info!("script exited without an exit code"),
        Err(error) => tracing::warn!("{error}"),
    }

    Ok(())
}

/// Run `script` through the command interpreter in the current console and
/// block until the interpreter returns. Nothing the interpreter reports is
/// surfaced beyond the log file.
#[tracing::instrument(skip_all, fields(script = %script, directory = script.directory()))]
pub fn launch_console(script: &ScriptPath) {
    match interpreter_command(script).status() {
        Ok(status) => tracing::info!("command interpreter exited with {status}"),
        Err(error) => tracing::warn!("could not start the command interpreter: {error}"),
    }
}

#[cfg(windows)]
fn interpreter_command(script: &ScriptPath) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(script);
    command
}

#[cfg(not(windows))]
fn interpreter_command(script: &ScriptPath) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(script);
    command
}
