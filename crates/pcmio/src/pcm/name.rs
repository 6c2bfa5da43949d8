// SPDX-License-Identifier: Apache-2.0

//! PCM device-node naming
//!
//! Parsing and synthesis of the `pcmC<card>D<device><c|p>` filename grammar
//! used by the kernel for PCM nodes under `/dev/snd`.

use std::fmt;
use std::path::PathBuf;

/// Directory scanned for PCM device nodes.
pub(crate) const SND_DIR: &str = "/dev/snd";

/// Transfer direction of a PCM device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Audio input, device-node suffix `c`
    Capture,
    /// Audio output, device-node suffix `p`
    Playback,
}

impl Direction {
    /// The single-character device-node suffix for this direction
    pub fn suffix(&self) -> char {
        match self {
            Direction::Capture => 'c',
            Direction::Playback => 'p',
        }
    }

    /// Get human-readable name for this direction
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Capture => "Capture",
            Direction::Playback => "Playback",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build the canonical device-node path for a (card, device, direction)
/// triple, e.g. `/dev/snd/pcmC2D1c`.
///
/// The result round-trips through [`ParsedName::parse`].
pub fn device_path(card: usize, device: usize, direction: Direction) -> PathBuf {
    PathBuf::from(format!(
        "{}/pcmC{}D{}{}",
        SND_DIR,
        card,
        device,
        direction.suffix()
    ))
}

/// A PCM device name parsed from a directory entry
///
/// Produced once per filename during enumeration and not retained; the
/// indices feed straight into [`device_path`](crate::pcm::device_path) /
/// [`Pcm::open_capture_device`](crate::pcm::Pcm::open_capture_device).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName {
    /// The index of the card
    pub card: usize,
    /// The index of the device on the card
    pub device: usize,
    /// Whether the node is capture or playback
    pub direction: Direction,
}

impl ParsedName {
    /// Parse a directory-entry filename against the PCM node grammar.
    ///
    /// The grammar is `pcmC<digits>D<digits><c|p>`: a literal `pcmC` prefix,
    /// a base-10 card index, a literal `D`, a base-10 device index, and a
    /// trailing direction character. Anything else is rejected with `None`,
    /// including digit runs that overflow `usize`.
    pub fn parse(name: &str) -> Option<ParsedName> {
        let bytes = name.as_bytes();

        if bytes.len() < 4 || &bytes[..4] != b"pcmC" {
            return None;
        }

        // First 'D' after the prefix splits the card span from the device span.
        let d_pos = 4 + bytes[4..].iter().position(|&b| b == b'D')?;

        let direction = match *bytes.last()? {
            b'c' => Direction::Capture,
            b'p' => Direction::Playback,
            _ => return None,
        };

        let card = parse_decimal(&bytes[4..d_pos])?;
        let device = parse_decimal(&bytes[d_pos + 1..bytes.len() - 1])?;

        Some(ParsedName {
            card,
            device,
            direction,
        })
    }
}

/// Parse a non-empty span of decimal digits, rejecting overflow.
fn parse_decimal(span: &[u8]) -> Option<usize> {
    if span.is_empty() {
        return None;
    }

    let mut value: usize = 0;
    for &b in span {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value
            .checked_mul(10)?
            .checked_add(usize::from(b - b'0'))?;
    }
    Some(value)
}
