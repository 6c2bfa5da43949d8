// SPDX-License-Identifier: Apache-2.0

//! PCM metadata types
//!
//! This module defines the value types returned by the `SNDRV_PCM_IOCTL_INFO`
//! control call:
//!
//! - [`PcmClass`] - Device class classification (generic, multi-channel, ...)
//! - [`PcmSubclass`] - Device subclass classification
//! - [`PcmInfo`] - Complete metadata snapshot for one device

use std::fmt;

use nix::libc;
use pcmio_sys as sys;

/// PCM device class
///
/// Unrecognized native codes map to [`PcmClass::Unknown`], never to an
/// undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcmClass {
    /// Class could not be determined from the native code
    Unknown,
    /// Standard mono or stereo device
    Generic,
    /// Multi-channel device
    MultiChannel,
    /// Software modem
    Modem,
    /// Digitizer
    Digitizer,
}

impl PcmClass {
    /// Convert from the native `SNDRV_PCM_CLASS_*` code
    pub fn from_raw(raw: libc::c_int) -> Self {
        match raw {
            sys::SNDRV_PCM_CLASS_GENERIC => PcmClass::Generic,
            sys::SNDRV_PCM_CLASS_MULTI => PcmClass::MultiChannel,
            sys::SNDRV_PCM_CLASS_MODEM => PcmClass::Modem,
            sys::SNDRV_PCM_CLASS_DIGITIZER => PcmClass::Digitizer,
            _ => PcmClass::Unknown,
        }
    }

    /// Get human-readable name for this class
    pub fn name(&self) -> &'static str {
        match self {
            PcmClass::Unknown => "Unknown",
            PcmClass::Generic => "Generic",
            PcmClass::MultiChannel => "Multi-channel",
            PcmClass::Modem => "Modem",
            PcmClass::Digitizer => "Digitizer",
        }
    }
}

impl fmt::Display for PcmClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// PCM device subclass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcmSubclass {
    /// Subclass could not be determined from the native code
    Unknown,
    /// Mono or stereo subdevices are mixed together
    GenericMix,
    /// Multi-channel subdevices are mixed together
    MultiChannelMix,
}

impl PcmSubclass {
    /// Convert from the native `SNDRV_PCM_SUBCLASS_*` code
    pub fn from_raw(raw: libc::c_int) -> Self {
        match raw {
            sys::SNDRV_PCM_SUBCLASS_GENERIC_MIX => PcmSubclass::GenericMix,
            sys::SNDRV_PCM_SUBCLASS_MULTI_MIX => PcmSubclass::MultiChannelMix,
            _ => PcmSubclass::Unknown,
        }
    }

    /// Get human-readable name for this subclass
    pub fn name(&self) -> &'static str {
        match self {
            PcmSubclass::Unknown => "Unknown",
            PcmSubclass::GenericMix => "Generic Mix",
            PcmSubclass::MultiChannelMix => "Multi-channel Mix",
        }
    }
}

impl fmt::Display for PcmSubclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Metadata snapshot for one PCM device
///
/// A plain value type with no ownership semantics; freely copyable. The text
/// buffers are fixed-size byte arrays as delivered by the kernel, not
/// guaranteed to be NUL-terminated; use [`id()`](PcmInfo::id),
/// [`name()`](PcmInfo::name), and [`subname()`](PcmInfo::subname) for a
/// textual view.
#[derive(Debug, Clone, Copy)]
pub struct PcmInfo {
    /// Device index on the card
    pub device: u32,
    /// Subdevice index
    pub subdevice: u32,
    /// Card index
    pub card: i32,
    /// Total number of subdevices
    pub subdevices_count: u32,
    /// Number of available subdevices
    pub subdevices_available: u32,
    /// Device identifier (user selectable)
    pub id: [u8; 64],
    /// Device name
    pub name: [u8; 80],
    /// Subdevice name
    pub subname: [u8; 32],
    /// Device class
    pub class: PcmClass,
    /// Device subclass
    pub subclass: PcmSubclass,
}

/// Copy at most `min(src, dst)` bytes, never overflowing the destination.
fn copy_truncated(dst: &mut [u8], src: &[u8]) {
    let n = dst.len().min(src.len());
    dst[..n].copy_from_slice(&src[..n]);
}

/// Borrow the text up to the first NUL, rendered lossily as UTF-8.
fn text(buf: &[u8]) -> std::borrow::Cow<'_, str> {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end])
}

impl PcmInfo {
    /// Translate the native info structure into a snapshot.
    ///
    /// Numeric fields are copied verbatim; the text buffers are copied up to
    /// the smaller of the source and destination capacities; class codes are
    /// mapped through [`PcmClass`]/[`PcmSubclass`] with unknown codes
    /// becoming `Unknown`.
    pub(crate) fn from_raw(raw: &sys::SndPcmInfo) -> Self {
        let mut info = PcmInfo {
            device: raw.device,
            subdevice: raw.subdevice,
            card: raw.card,
            subdevices_count: raw.subdevices_count,
            subdevices_available: raw.subdevices_avail,
            id: [0; 64],
            name: [0; 80],
            subname: [0; 32],
            class: PcmClass::from_raw(raw.dev_class),
            subclass: PcmSubclass::from_raw(raw.dev_subclass),
        };

        copy_truncated(&mut info.id, &raw.id);
        copy_truncated(&mut info.name, &raw.name);
        copy_truncated(&mut info.subname, &raw.subname);

        info
    }

    /// Device identifier as text
    pub fn id(&self) -> std::borrow::Cow<'_, str> {
        text(&self.id)
    }

    /// Device name as text
    pub fn name(&self) -> std::borrow::Cow<'_, str> {
        text(&self.name)
    }

    /// Subdevice name as text
    pub fn subname(&self) -> std::borrow::Cow<'_, str> {
        text(&self.subname)
    }
}

impl fmt::Display for PcmInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "card      : {}", self.card)?;
        writeln!(f, "device    : {}", self.device)?;
        writeln!(f, "subdevice : {}", self.subdevice)?;
        writeln!(f, "class     : {}", self.class)?;
        writeln!(f, "subclass  : {}", self.subclass)?;
        writeln!(f, "id        : {}", self.id())?;
        writeln!(f, "name      : {}", self.name())?;
        writeln!(f, "subname   : {}", self.subname())?;
        writeln!(f, "subdevices count     : {}", self.subdevices_count)?;
        write!(f, "subdevices available : {}", self.subdevices_available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_from_raw() {
        assert_eq!(PcmClass::from_raw(sys::SNDRV_PCM_CLASS_GENERIC), PcmClass::Generic);
        assert_eq!(PcmClass::from_raw(sys::SNDRV_PCM_CLASS_MULTI), PcmClass::MultiChannel);
        assert_eq!(PcmClass::from_raw(sys::SNDRV_PCM_CLASS_MODEM), PcmClass::Modem);
        assert_eq!(
            PcmClass::from_raw(sys::SNDRV_PCM_CLASS_DIGITIZER),
            PcmClass::Digitizer
        );
    }

    #[test]
    fn test_class_from_raw_unknown() {
        // Codes outside the enum range map to Unknown, never panic.
        assert_eq!(PcmClass::from_raw(-1), PcmClass::Unknown);
        assert_eq!(PcmClass::from_raw(9999), PcmClass::Unknown);
    }

    #[test]
    fn test_subclass_from_raw() {
        assert_eq!(
            PcmSubclass::from_raw(sys::SNDRV_PCM_SUBCLASS_GENERIC_MIX),
            PcmSubclass::GenericMix
        );
        assert_eq!(
            PcmSubclass::from_raw(sys::SNDRV_PCM_SUBCLASS_MULTI_MIX),
            PcmSubclass::MultiChannelMix
        );
        assert_eq!(PcmSubclass::from_raw(77), PcmSubclass::Unknown);
    }

    #[test]
    fn test_class_display() {
        assert_eq!(format!("{}", PcmClass::MultiChannel), "Multi-channel");
        assert_eq!(format!("{}", PcmSubclass::GenericMix), "Generic Mix");
    }

    #[test]
    fn test_from_raw_copies_fields() {
        let mut raw = sys::SndPcmInfo::new();
        raw.device = 3;
        raw.subdevice = 1;
        raw.card = 2;
        raw.subdevices_count = 4;
        raw.subdevices_avail = 2;
        raw.dev_class = sys::SNDRV_PCM_CLASS_MULTI;
        raw.dev_subclass = sys::SNDRV_PCM_SUBCLASS_MULTI_MIX;
        raw.name[..5].copy_from_slice(b"Intel");

        let info = PcmInfo::from_raw(&raw);
        assert_eq!(info.device, 3);
        assert_eq!(info.subdevice, 1);
        assert_eq!(info.card, 2);
        assert_eq!(info.subdevices_count, 4);
        assert_eq!(info.subdevices_available, 2);
        assert_eq!(info.class, PcmClass::MultiChannel);
        assert_eq!(info.subclass, PcmSubclass::MultiChannelMix);
        assert_eq!(info.name(), "Intel");
    }

    #[test]
    fn test_copy_truncated_never_overflows() {
        let mut dst = [0u8; 4];
        copy_truncated(&mut dst, b"abcdefgh");
        assert_eq!(&dst, b"abcd");

        let mut wide = [0xffu8; 8];
        copy_truncated(&mut wide, b"ab");
        assert_eq!(&wide[..2], b"ab");
        assert_eq!(wide[2], 0xff);
    }

    #[test]
    fn test_text_without_nul_terminator() {
        // A buffer completely full of text has no NUL; the view must stop at
        // the copied length, not run past it.
        let buf = [b'x'; 8];
        assert_eq!(text(&buf), "xxxxxxxx");
    }
}
