// SPDX-License-Identifier: Apache-2.0

//! PCM Device Access and Enumeration API
//!
//! This module provides direct access to ALSA PCM character devices on Linux.
//! It covers the device-handle lifecycle, the `/dev/snd` naming grammar, and
//! the interleaved frame-transfer protocol.
//!
//! # Features
//!
//! - **Device Handles**: Open capture/playback devices by index or path via
//!   [`Pcm`], with prepare/start/drop stream control
//! - **Metadata**: Query device identity and classification via
//!   `SNDRV_PCM_IOCTL_INFO` into a [`PcmInfo`] snapshot
//! - **Enumeration**: Scan all `/dev/snd/pcmC*D*[cp]` entries into an ordered
//!   [`PcmList`]
//! - **Capture**: Raw interleaved frame reads via [`InterleavedReader`]
//!
//! # Device Naming
//!
//! PCM device nodes follow the grammar `pcmC<card>D<device><direction>` where
//! the trailing character is `c` for capture or `p` for playback, e.g.
//! `/dev/snd/pcmC0D0c`. [`ParsedName`] implements the parser and
//! [`device_path`] the inverse.
//!
//! # Quick Start
//!
//! ```no_run
//! use pcmio::pcm::PcmList;
//!
//! let list = PcmList::scan();
//! println!("found {} PCM devices", list.len());
//! for info in &list {
//!     println!("  {}", info);
//! }
//! ```
//!
//! # See Also
//!
//! - [`Pcm`] - Device handle owning one open descriptor
//! - [`PcmList`] - One-shot enumeration over `/dev/snd`
//! - [`InterleavedReader`] - Capture specialization of [`Pcm`]

mod device;
mod enumerator;
mod info;
mod name;
mod reader;

pub use device::{Config, Pcm};
pub use enumerator::PcmList;
pub use info::{PcmClass, PcmInfo, PcmSubclass};
pub use name::{device_path, Direction, ParsedName};
pub use reader::InterleavedReader;
