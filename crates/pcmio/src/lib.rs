// SPDX-License-Identifier: Apache-2.0

//! pcmio - a minimal abstraction over the ALSA PCM character-device interface
//!
//! This crate opens playback and capture sound devices beneath `/dev/snd`,
//! queries their metadata, transfers interleaved audio frames, and enumerates
//! every PCM device present on the host. It talks to the kernel directly over
//! the `SNDRV_PCM_IOCTL_*` control interface; no user-space sound library is
//! involved.
//!
//! # Quick Start
//!
//! ## Enumerating Devices
//!
//! ```no_run
//! use pcmio::pcm::PcmList;
//!
//! let list = PcmList::scan();
//! for info in &list {
//!     println!("card {} device {}: {}", info.card, info.device, info.name());
//! }
//! ```
//!
//! ## Capturing Frames
//!
//! ```no_run
//! use pcmio::pcm::InterleavedReader;
//!
//! let mut reader = InterleavedReader::open(0, 0, false)?;
//! reader.prepare()?;
//! reader.start()?;
//!
//! // 4 bytes per frame: 2 channels of 16-bit samples, matching the
//! // device's configured frame size
//! let mut buf = vec![0u8; 1024 * 4];
//! let frames = unsafe { reader.read_unformatted(&mut buf, 4)? };
//! println!("captured {} frames", frames);
//! # Ok::<(), pcmio::Error>(())
//! ```
//!
//! # Resource Model
//!
//! Every operation is a direct, synchronous call into the kernel and returns
//! only after that call completes. A [`pcm::Pcm`] handle owns exactly one
//! descriptor; dropping the handle closes it. Handles are movable but not
//! clonable, and are not designed for concurrent use from multiple threads
//! without external synchronization.

use std::{error, fmt, io};

pub use nix::errno::Errno;

/// Error type for pcmio operations
///
/// The control interface reports failure as an errno; [`Error::Os`] carries
/// it verbatim. The two remaining variants cover the contract-level failures
/// that do not originate in a syscall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A syscall on the device failed with the given platform error code
    Os(Errno),

    /// A device operation was issued on a handle that was never opened
    NotOpen,

    /// The operation is part of the interface but deliberately unimplemented
    /// (format/rate negotiation via [`pcm::Pcm::setup`])
    Unsupported,
}

impl Error {
    /// The platform error code equivalent to this error
    ///
    /// [`Error::NotOpen`] maps to `ENOENT` and [`Error::Unsupported`] to
    /// `EPROTO`, matching how the control interface itself would report them.
    pub fn errno(&self) -> Errno {
        match self {
            Error::Os(errno) => *errno,
            Error::NotOpen => Errno::ENOENT,
            Error::Unsupported => Errno::EPROTO,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Os(errno) => write!(f, "{}", errno.desc()),
            Error::NotOpen => write!(f, "device handle is not open"),
            Error::Unsupported => write!(f, "operation not supported by this implementation"),
        }
    }
}

impl error::Error for Error {}

impl From<Errno> for Error {
    fn from(errno: Errno) -> Self {
        Error::Os(errno)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => Error::Os(Errno::from_raw(code)),
            None => Error::Os(Errno::EIO),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::from_raw_os_error(err.errno() as i32)
    }
}

/// The pcm module provides device handles, metadata, enumeration, and
/// interleaved frame transfer.
pub mod pcm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(Error::NotOpen.errno(), Errno::ENOENT);
        assert_eq!(Error::Unsupported.errno(), Errno::EPROTO);
        assert_eq!(Error::Os(Errno::EBUSY).errno(), Errno::EBUSY);
    }

    #[test]
    fn test_display_uses_platform_description() {
        assert_eq!(
            format!("{}", Error::Os(Errno::ENOENT)),
            Errno::ENOENT.desc()
        );
    }

    #[test]
    fn test_io_error_round_trip() {
        let err: Error = io::Error::from_raw_os_error(libc::EACCES).into();
        assert_eq!(err, Error::Os(Errno::EACCES));

        let io_err: io::Error = Error::NotOpen.into();
        assert_eq!(io_err.raw_os_error(), Some(libc::ENOENT));
    }
}
