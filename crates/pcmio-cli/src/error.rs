// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments
    InvalidArgs(String),
    /// PCM device not found or inaccessible
    DeviceNotFound(String),
    /// Device is present but refused the requested operation
    DeviceFailed(String),
    /// General error
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            CliError::DeviceFailed(msg) => write!(f, "Device error: {}", msg),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidArgs(_) => ExitCode::from(2),
            CliError::DeviceNotFound(_) => ExitCode::from(3),
            CliError::DeviceFailed(_) => ExitCode::from(4),
            CliError::General(_) => ExitCode::from(1),
        }
    }
}

/// Map pcmio::Error to CliError with appropriate exit codes
impl From<pcmio::Error> for CliError {
    fn from(err: pcmio::Error) -> Self {
        use pcmio::{Errno, Error};

        match err {
            Error::NotOpen => CliError::DeviceNotFound("device handle is not open".to_string()),
            Error::Unsupported => {
                CliError::DeviceFailed("operation not supported by this device layer".to_string())
            }
            Error::Os(errno) => match errno {
                Errno::ENOENT | Errno::ENODEV | Errno::ENXIO => {
                    CliError::DeviceNotFound(errno.desc().to_string())
                }
                Errno::EACCES | Errno::EPERM => {
                    CliError::DeviceNotFound(format!("permission denied: {}", errno.desc()))
                }
                Errno::EBUSY => CliError::DeviceFailed("device is busy".to_string()),
                _ => CliError::DeviceFailed(errno.desc().to_string()),
            },
        }
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::InvalidArgs("test".into()).exit_code(),
            ExitCode::from(2)
        );
        assert_eq!(
            CliError::DeviceNotFound("test".into()).exit_code(),
            ExitCode::from(3)
        );
        assert_eq!(
            CliError::DeviceFailed("test".into()).exit_code(),
            ExitCode::from(4)
        );
        assert_eq!(
            CliError::General("test".into()).exit_code(),
            ExitCode::from(1)
        );
    }

    #[test]
    fn test_error_display() {
        let err = CliError::DeviceNotFound("/dev/snd/pcmC0D0c".to_string());
        assert_eq!(format!("{}", err), "Device not found: /dev/snd/pcmC0D0c");
    }

    #[test]
    fn test_library_error_mapping() {
        let err: CliError = pcmio::Error::NotOpen.into();
        assert!(matches!(err, CliError::DeviceNotFound(_)));

        let err: CliError = pcmio::Error::Unsupported.into();
        assert!(matches!(err, CliError::DeviceFailed(_)));
    }
}
