// SPDX-License-Identifier: Apache-2.0

//! Low-level bindings for the ALSA PCM character-device interface.
//!
//! This crate mirrors the small slice of `<sound/asound.h>` that pcmio
//! needs: the `snd_pcm_info` metadata structure, the `snd_xferi`
//! interleaved-transfer structure, and the `SNDRV_PCM_IOCTL_*` requests
//! that operate on an open `/dev/snd/pcmC*D*[cp]` descriptor.
//!
//! The structures are hand-written `#[repr(C)]` mirrors of the kernel
//! UAPI; their sizes are pinned by unit tests so an accidental field
//! change cannot silently corrupt the ioctl ABI.

use nix::libc;

/// Stream direction constants (`SNDRV_PCM_STREAM_*`).
pub const SNDRV_PCM_STREAM_PLAYBACK: libc::c_int = 0;
pub const SNDRV_PCM_STREAM_CAPTURE: libc::c_int = 1;

/// Device class constants (`SNDRV_PCM_CLASS_*`).
pub const SNDRV_PCM_CLASS_GENERIC: libc::c_int = 0;
pub const SNDRV_PCM_CLASS_MULTI: libc::c_int = 1;
pub const SNDRV_PCM_CLASS_MODEM: libc::c_int = 2;
pub const SNDRV_PCM_CLASS_DIGITIZER: libc::c_int = 3;

/// Device subclass constants (`SNDRV_PCM_SUBCLASS_*`).
pub const SNDRV_PCM_SUBCLASS_GENERIC_MIX: libc::c_int = 0;
pub const SNDRV_PCM_SUBCLASS_MULTI_MIX: libc::c_int = 1;

pub type SndPcmSFrames = libc::c_long;
pub type SndPcmUFrames = libc::c_ulong;

/// Kernel `struct snd_pcm_info`, returned by `SNDRV_PCM_IOCTL_INFO`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SndPcmInfo {
    pub device: libc::c_uint,
    pub subdevice: libc::c_uint,
    pub stream: libc::c_int,
    pub card: libc::c_int,
    pub id: [libc::c_uchar; 64],
    pub name: [libc::c_uchar; 80],
    pub subname: [libc::c_uchar; 32],
    pub dev_class: libc::c_int,
    pub dev_subclass: libc::c_int,
    pub subdevices_count: libc::c_uint,
    pub subdevices_avail: libc::c_uint,
    pub sync: [libc::c_uchar; 16],
    pub reserved: [libc::c_uchar; 64],
}

impl SndPcmInfo {
    pub fn new() -> Self {
        Self {
            device: 0,
            subdevice: 0,
            stream: 0,
            card: 0,
            id: [0; 64],
            name: [0; 80],
            subname: [0; 32],
            dev_class: 0,
            dev_subclass: 0,
            subdevices_count: 0,
            subdevices_avail: 0,
            sync: [0; 16],
            reserved: [0; 64],
        }
    }
}

impl Default for SndPcmInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Kernel `struct snd_xferi` for interleaved frame transfers.
///
/// `frames` carries the requested frame count into the kernel; `result`
/// carries the number of frames actually transferred back out.
#[repr(C)]
#[derive(Debug)]
pub struct SndXferi {
    pub result: SndPcmSFrames,
    pub buf: *mut libc::c_void,
    pub frames: SndPcmUFrames,
}

const SNDRV_PCM_IOCTL_MAGIC: u8 = b'A';
const SNDRV_PCM_IOCTL_INFO: u8 = 0x01;
const SNDRV_PCM_IOCTL_PREPARE: u8 = 0x40;
const SNDRV_PCM_IOCTL_START: u8 = 0x42;
const SNDRV_PCM_IOCTL_DROP: u8 = 0x43;
const SNDRV_PCM_IOCTL_WRITEI_FRAMES: u8 = 0x50;
const SNDRV_PCM_IOCTL_READI_FRAMES: u8 = 0x51;

nix::ioctl_read!(
    pcm_info,
    SNDRV_PCM_IOCTL_MAGIC,
    SNDRV_PCM_IOCTL_INFO,
    SndPcmInfo
);
nix::ioctl_none!(pcm_prepare, SNDRV_PCM_IOCTL_MAGIC, SNDRV_PCM_IOCTL_PREPARE);
nix::ioctl_none!(pcm_start, SNDRV_PCM_IOCTL_MAGIC, SNDRV_PCM_IOCTL_START);
nix::ioctl_none!(pcm_drop, SNDRV_PCM_IOCTL_MAGIC, SNDRV_PCM_IOCTL_DROP);
nix::ioctl_write_ptr!(
    pcm_writei,
    SNDRV_PCM_IOCTL_MAGIC,
    SNDRV_PCM_IOCTL_WRITEI_FRAMES,
    SndXferi
);
nix::ioctl_read!(
    pcm_readi,
    SNDRV_PCM_IOCTL_MAGIC,
    SNDRV_PCM_IOCTL_READI_FRAMES,
    SndXferi
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    // Sizes pinned against the kernel UAPI so the ioctl ABI cannot drift.

    #[test]
    fn snd_pcm_info_matches_kernel_abi() {
        assert_eq!(mem::size_of::<SndPcmInfo>(), 288);
    }

    #[test]
    fn snd_xferi_matches_kernel_abi() {
        assert_eq!(
            mem::size_of::<SndXferi>(),
            mem::size_of::<SndPcmSFrames>()
                + mem::size_of::<*mut libc::c_void>()
                + mem::size_of::<SndPcmUFrames>()
        );
    }

    #[test]
    fn info_struct_starts_zeroed() {
        let info = SndPcmInfo::new();
        assert_eq!(info.device, 0);
        assert_eq!(info.card, 0);
        assert!(info.id.iter().all(|&b| b == 0));
        assert!(info.name.iter().all(|&b| b == 0));
        assert!(info.subname.iter().all(|&b| b == 0));
    }
}
