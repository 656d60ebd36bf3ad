use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// The script process could not be created; `code` is the OS error code
    #[error("Error creating process: {code}")]
    CreateProcess { code: i32 },
    #[error("Error waiting for process: {code}")]
    Wait { code: i32 },
    #[error("could not determine the invocation path: {0}")]
    Invocation(#[from] std::io::Error),
}

impl LaunchError {
    pub fn create_process(error: &std::io::Error) -> Self {
        Self::CreateProcess {
            code: error.raw_os_error().unwrap_or(-1),
        }
    }

    pub fn wait(error: &std::io::Error) -> Self {
        Self::Wait {
            code: error.raw_os_error().unwrap_or(-1),
        }
    }
}
