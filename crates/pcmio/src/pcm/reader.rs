// SPDX-License-Identifier: Apache-2.0

//! Interleaved frame capture

use nix::libc;
use pcmio_sys as sys;

use super::device::Pcm;
use super::info::PcmInfo;
use crate::Error;

/// Capture specialization of [`Pcm`]
///
/// Combines a capture-direction open with raw interleaved frame reads over
/// `SNDRV_PCM_IOCTL_READI_FRAMES`. The reader performs no retries: a short
/// read is reported as success with the actual count, and retry or
/// backpressure policy belongs to the caller.
///
/// # Example
///
/// ```no_run
/// use pcmio::pcm::InterleavedReader;
///
/// let mut reader = InterleavedReader::open(0, 0, false)?;
/// reader.prepare()?;
/// reader.start()?;
///
/// // The device is configured for 4-byte frames.
/// let mut buf = vec![0u8; 512 * 4];
/// let frames = unsafe { reader.read_unformatted(&mut buf, 4)? };
/// println!("got {} frames", frames);
/// # Ok::<(), pcmio::Error>(())
/// ```
#[derive(Debug)]
pub struct InterleavedReader {
    pcm: Pcm,
}

impl InterleavedReader {
    /// Open the capture device for a (card, device) pair.
    ///
    /// Under `non_blocking`, a read with no frames available fails with the
    /// platform's would-block error instead of suspending the caller.
    pub fn open(card: usize, device: usize, non_blocking: bool) -> Result<Self, Error> {
        let mut pcm = Pcm::new();
        pcm.open_capture_device(card, device, non_blocking)?;
        Ok(InterleavedReader { pcm })
    }

    /// Read up to `frame_count` interleaved frames into `frames`.
    ///
    /// On success returns the number of frames actually transferred, which
    /// may be less than requested. On syscall failure returns the invalid
    /// argument error with zero frames transferred.
    ///
    /// # Safety
    ///
    /// `frames` must be valid for writes of `frame_count` frames at the
    /// device's current frame size; the kernel does not know the buffer's
    /// length.
    pub unsafe fn read_unformatted_raw(
        &self,
        frames: *mut libc::c_void,
        frame_count: usize,
    ) -> Result<usize, Error> {
        let fd = self.pcm.file_descriptor().ok_or(Error::NotOpen)?;

        let mut transfer = sys::SndXferi {
            result: 0,
            buf: frames,
            frames: frame_count as sys::SndPcmUFrames,
        };

        // The raw errno is not forwarded here; a failed transfer reports the
        // generic invalid-argument code, matching the transfer protocol.
        if unsafe { sys::pcm_readi(fd, &mut transfer) }.is_err() {
            return Err(Error::Os(nix::errno::Errno::EINVAL));
        }

        Ok(transfer.result as usize)
    }

    /// Read interleaved frames into `buf`, given the frame size in bytes.
    ///
    /// Slice wrapper over [`read_unformatted_raw`](Self::read_unformatted_raw)
    /// that requests at most `buf.len() / bytes_per_frame` frames. Returns
    /// the number of frames transferred.
    ///
    /// # Safety
    ///
    /// `bytes_per_frame` must be at least the device's currently configured
    /// frame size. The kernel sizes the transfer by its own frame size, not
    /// by `buf.len()`; an understated `bytes_per_frame` makes the requested
    /// frame count overrun `buf`.
    pub unsafe fn read_unformatted(
        &self,
        buf: &mut [u8],
        bytes_per_frame: usize,
    ) -> Result<usize, Error> {
        if bytes_per_frame == 0 {
            return Err(Error::Os(nix::errno::Errno::EINVAL));
        }

        let frame_count = buf.len() / bytes_per_frame;
        unsafe { self.read_unformatted_raw(buf.as_mut_ptr().cast(), frame_count) }
    }

    /// Prepare the underlying device for streaming.
    pub fn prepare(&self) -> Result<(), Error> {
        self.pcm.prepare()
    }

    /// Start the capture stream.
    pub fn start(&self) -> Result<(), Error> {
        self.pcm.start()
    }

    /// Stop the stream, dropping pending frames.
    pub fn drop_frames(&self) -> Result<(), Error> {
        self.pcm.drop_frames()
    }

    /// Query metadata for the opened device.
    pub fn info(&self) -> Result<PcmInfo, Error> {
        self.pcm.info()
    }

    /// Close the underlying device.
    pub fn close(&mut self) -> Result<(), Error> {
        self.pcm.close()
    }

    /// Whether the underlying device is open
    pub fn is_open(&self) -> bool {
        self.pcm.is_open()
    }

    /// Borrow the underlying device handle
    pub fn pcm(&self) -> &Pcm {
        &self.pcm
    }
}
