use std::ffi::OsStr;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::MAIN_SEPARATOR;

use crate::LaunchError;

/// Extension of the script launched in place of the running executable
pub const SCRIPT_EXTENSION: &str = "bat";

const SEPARATORS: [char; 2] = ['\\', '/'];

/// Path of the batch script that shares the running executable's directory
/// and base name.
///
/// Derivation is purely textual: `C:\tools\app.v2.exe` becomes
/// `C:\tools\app.v2.bat`. Either `\` or `/` splits the directory from the file
/// name. On Windows the parts are always joined with `\`; elsewhere the
/// separator found in the invocation path is reused.
///
/// An invocation path without any separator yields an empty directory and a
/// path rooted at [`MAIN_SEPARATOR`] (`\app.bat` on Windows). That result is
/// malformed and deliberately left uncorrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPath {
    path: String,
    directory_len: usize,
}

#[cfg(windows)]
const fn join_separator(_found: char) -> char {
    '\\'
}

#[cfg(not(windows))]
const fn join_separator(found: char) -> char {
    found
}

impl ScriptPath {
    pub fn resolve(invocation: &str) -> Self {
        let (directory, separator, file_name) = match invocation.rfind(SEPARATORS) {
            Some(index) => (
                &invocation[..index],
                join_separator(invocation[index..].chars().next().unwrap_or(MAIN_SEPARATOR)),
                &invocation[index + 1..],
            ),
            None => ("", MAIN_SEPARATOR, invocation),
        };

        // everything before the final dot, or the whole name if there is none
        let base_name = file_name
            .rfind('.')
            .map_or(file_name, |index| &file_name[..index]);

        Self {
            path: format!("{directory}{separator}{base_name}.{SCRIPT_EXTENSION}"),
            directory_len: directory.len(),
        }
    }

    /// Resolve the script for the running process from argv[0], falling back
    /// to the executable path reported by the OS when argv[0] is missing
    pub fn resolve_current() -> Result<Self, LaunchError> {
        let invocation = match std::env::args_os().next().filter(|argv0| !argv0.is_empty()) {
            Some(argv0) => argv0,
            None => std::env::current_exe()?.into_os_string(),
        };

        Ok(Self::resolve(&invocation.to_string_lossy()))
    }

    pub fn directory(&self) -> &str {
        &self.path[..self.directory_len]
    }

    pub fn base_name(&self) -> &str {
        &self.path[self.directory_len + 1..self.path.len() - SCRIPT_EXTENSION.len() - 1]
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl Display for ScriptPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<OsStr> for ScriptPath {
    fn as_ref(&self) -> &OsStr {
        OsStr::new(&self.path)
    }
}
