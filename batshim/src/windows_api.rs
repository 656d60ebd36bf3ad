use std::ffi::OsStr;
use std::iter::once;
use std::os::windows::ffi::OsStrExt;

use windows::core::Error as WindowsCrateError;
use windows::core::PCWSTR;
use windows::core::PWSTR;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::Foundation::HANDLE;
use windows::Win32::Foundation::WAIT_FAILED;
use windows::Win32::System::Threading::CreateProcessW;
use windows::Win32::System::Threading::GetExitCodeProcess;
use windows::Win32::System::Threading::WaitForSingleObject;
use windows::Win32::System::Threading::CREATE_NO_WINDOW;
use windows::Win32::System::Threading::INFINITE;
use windows::Win32::System::Threading::PROCESS_INFORMATION;
use windows::Win32::System::Threading::STARTF_USESHOWWINDOW;
use windows::Win32::System::Threading::STARTUPINFOW;
use windows::Win32::UI::WindowsAndMessaging::SW_HIDE;

use crate::LaunchError;

const FACILITY_WIN32_MASK: u32 = 0xFFFF_0000;
const FACILITY_WIN32_PREFIX: u32 = 0x8007_0000;

/// Recover the Win32 error code that the windows crate folded into an HRESULT
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn win32_code(error: &WindowsCrateError) -> i32 {
    let hresult = error.code().0;
    if hresult as u32 & FACILITY_WIN32_MASK == FACILITY_WIN32_PREFIX {
        (hresult as u32 & !FACILITY_WIN32_MASK) as i32
    } else {
        hresult
    }
}

/// Process and primary thread handles of a child; both are closed on drop
#[derive(Debug)]
pub struct OwnedProcess {
    information: PROCESS_INFORMATION,
}

impl OwnedProcess {
    pub const fn id(&self) -> u32 {
        self.information.dwProcessId
    }

    const fn process(&self) -> HANDLE {
        self.information.hProcess
    }
}

impl Drop for OwnedProcess {
    fn drop(&mut self) {
        for handle in [self.information.hProcess, self.information.hThread] {
            if let Err(error) = WindowsApi::close_handle(handle) {
                tracing::warn!("could not close handle for process {}: {error}", self.id());
            }
        }
    }
}

pub struct WindowsApi;

impl WindowsApi {
    /// Start `program` with `SW_HIDE` and `CREATE_NO_WINDOW`, quoting it as
    /// the whole command line so that directories with spaces resolve
    pub fn create_hidden_process(program: &OsStr) -> Result<OwnedProcess, LaunchError> {
        let quote = u16::from(b'"');

        // CreateProcessW may write into the command line buffer
        let mut command_line: Vec<u16> = once(quote)
            .chain(program.encode_wide())
            .chain([quote, 0])
            .collect();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let startup_info = STARTUPINFOW {
            cb: std::mem::size_of::<STARTUPINFOW>() as u32,
            dwFlags: STARTF_USESHOWWINDOW,
            wShowWindow: SW_HIDE.0 as u16,
            ..Default::default()
        };
        let mut information = PROCESS_INFORMATION::default();

        unsafe {
            CreateProcessW(
                PCWSTR::null(),
                Some(PWSTR(command_line.as_mut_ptr())),
                None,
                None,
                false,
                CREATE_NO_WINDOW,
                None,
                PCWSTR::null(),
                &startup_info,
                &mut information,
            )
        }
        .map_err(|error| LaunchError::CreateProcess {
            code: win32_code(&error),
        })?;

        tracing::debug!("created process {}", information.dwProcessId);

        Ok(OwnedProcess { information })
    }

    pub fn wait_for_process(process: &OwnedProcess) -> Result<(), LaunchError> {
        if unsafe { WaitForSingleObject(process.process(), INFINITE) } == WAIT_FAILED {
            return Err(LaunchError::wait(&std::io::Error::last_os_error()));
        }

        Ok(())
    }

    #[allow(clippy::cast_possible_wrap)]
    pub fn exit_code_process(process: &OwnedProcess) -> Result<i32, LaunchError> {
        let mut exit_code = 0u32;
        unsafe { GetExitCodeProcess(process.process(), &mut exit_code) }
            .map_err(|error| LaunchError::Wait {
                code: win32_code(&error),
            })?;

        Ok(exit_code as i32)
    }

    pub fn close_handle(handle: HANDLE) -> Result<(), LaunchError> {
        if handle.is_invalid() {
            return Ok(());
        }

        unsafe { CloseHandle(handle) }.map_err(|error| LaunchError::Wait {
            code: win32_code(&error),
        })
    }
}
