//! # Capture Frame Source
//!
//! Turns an offline capture file into a lazy sequence of [`FrameRecord`]s.
//!
//! * [`reader`] walks the pcap / pcapng container (optionally gzipped).
//! * [`dot11`] strips the link-layer encapsulation and decodes the 802.11 MAC
//!   header of each frame.
//!
//! Only opening the capture can fail hard. Frames that do not decode are still
//! yielded, flagged with a [`DecodeError`](espy_common::frame::DecodeError), and
//! left for the consumer to skip.
//!
//! [`FrameRecord`]: espy_common::frame::FrameRecord

use std::io;

use thiserror::Error;

pub mod dot11;
pub mod reader;

pub use reader::CaptureReader;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open capture {path:?}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid capture format: {reason}")]
    InvalidFormat { reason: String },
    #[error("failed to read capture")]
    Io(#[from] io::Error),
}

/// Link-layer header types (LINKTYPE_* values) relevant to wireless captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLayer {
    /// Bare 802.11 frames.
    Ieee80211,
    /// 802.11 frames behind a radiotap header (Linux monitor mode).
    Radiotap,
    /// 802.11 frames behind a fixed-size Prism monitor header.
    Prism,
    /// 802.11 frames behind an AVS monitor header.
    Avs,
    /// Anything else. Such frames carry no 802.11 header.
    Other(i32),
}

impl LinkLayer {
    pub fn from_raw(linktype: i32) -> Self {
        match linktype {
            105 => LinkLayer::Ieee80211,
            119 => LinkLayer::Prism,
            127 => LinkLayer::Radiotap,
            163 => LinkLayer::Avs,
            other => LinkLayer::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_layer_from_raw() {
        assert_eq!(LinkLayer::from_raw(105), LinkLayer::Ieee80211);
        assert_eq!(LinkLayer::from_raw(127), LinkLayer::Radiotap);
        assert_eq!(LinkLayer::from_raw(119), LinkLayer::Prism);
        assert_eq!(LinkLayer::from_raw(163), LinkLayer::Avs);
        assert_eq!(LinkLayer::from_raw(1), LinkLayer::Other(1));
    }
}
