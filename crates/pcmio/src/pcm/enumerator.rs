// SPDX-License-Identifier: Apache-2.0

//! PCM device enumeration
//!
//! This module provides the [`PcmList`] type for discovering PCM devices
//! beneath `/dev/snd`.

use std::fs;
use std::path::Path;

use super::device::Pcm;
use super::info::PcmInfo;
use super::name::{Direction, ParsedName, SND_DIR};

/// An ordered snapshot of every PCM device discovered in one scan
///
/// Construction performs the entire scan synchronously: every entry in the
/// device directory runs through the name parser, each valid candidate is
/// opened blocking in its parsed direction by a short-lived probe handle,
/// queried for metadata, and the surviving snapshots are collected in
/// directory-scan order. The probe handle is discarded after each candidate.
///
/// Enumeration is best-effort throughout. An unreadable directory yields an
/// empty list, and a candidate whose open or info query fails is skipped, so
/// one malfunctioning device never prevents discovery of the rest.
///
/// The list is immutable after construction; it is movable but not clonable.
///
/// # Example
///
/// ```no_run
/// use pcmio::pcm::PcmList;
///
/// let list = PcmList::scan();
/// println!("found {} PCM devices", list.len());
/// for info in &list {
///     println!("card {} device {}: {}", info.card, info.device, info.name());
/// }
/// ```
#[derive(Debug, Default)]
pub struct PcmList {
    infos: Vec<PcmInfo>,
}

impl PcmList {
    /// Scan `/dev/snd` and collect metadata for every usable PCM device.
    pub fn scan() -> PcmList {
        Self::scan_dir(SND_DIR)
    }

    /// Scan an alternate device directory.
    ///
    /// The entries are parsed exactly as [`scan`](Self::scan) parses
    /// `/dev/snd`; candidate devices are still opened through their canonical
    /// `/dev/snd` paths. Mainly useful for exercising the filtering logic
    /// against a synthetic directory tree.
    pub fn scan_dir<P: AsRef<Path>>(dir: P) -> PcmList {
        let mut infos = Vec::new();

        let entries = match fs::read_dir(dir.as_ref()) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("cannot open {}: {}", dir.as_ref().display(), err);
                return PcmList { infos };
            }
        };

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(name) => name,
                None => continue,
            };

            let parsed = match ParsedName::parse(name) {
                Some(parsed) => parsed,
                None => continue,
            };

            // Probe handle, dropped at the end of the iteration.
            let mut pcm = Pcm::new();
            let opened = match parsed.direction {
                Direction::Capture => pcm.open_capture_device(parsed.card, parsed.device, false),
                Direction::Playback => pcm.open_playback_device(parsed.card, parsed.device, false),
            };

            if let Err(err) = opened {
                log::debug!("skipping {}: open failed: {}", name, err);
                continue;
            }

            match pcm.info() {
                Ok(info) => infos.push(info),
                Err(err) => {
                    log::debug!("skipping {}: info query failed: {}", name, err);
                }
            }
        }

        PcmList { infos }
    }

    /// The collected snapshots, in directory-scan order
    pub fn as_slice(&self) -> &[PcmInfo] {
        &self.infos
    }

    /// Number of devices discovered
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Whether the scan found no devices
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Iterate over the collected snapshots
    pub fn iter(&self) -> std::slice::Iter<'_, PcmInfo> {
        self.infos.iter()
    }
}

impl<'a> IntoIterator for &'a PcmList {
    type Item = &'a PcmInfo;
    type IntoIter = std::slice::Iter<'a, PcmInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.infos.iter()
    }
}

impl IntoIterator for PcmList {
    type Item = PcmInfo;
    type IntoIter = std::vec::IntoIter<PcmInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.infos.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let list = PcmList::scan_dir("/this/path/does/not/exist");
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.as_slice().is_empty());
    }

    #[test]
    fn test_empty_list_iterates_nothing() {
        let list = PcmList::default();
        assert_eq!(list.iter().count(), 0);
        assert_eq!((&list).into_iter().count(), 0);
    }
}
