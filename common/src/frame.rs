//! # Captured Frame Model
//!
//! What a frame source hands to the scanner: one [`FrameRecord`] per captured
//! frame, carrying the decoded 802.11 MAC header when there is one.
//!
//! A record has two independent optional parts:
//! * `error` - set when a lower layer failed to decode. Such frames are noise and
//!   must not be trusted, even if a header was recovered.
//! * `header` - present only for frames whose link layer is 802.11.

use std::fmt;

use pnet::util::MacAddr;
use thiserror::Error;

/// Why a frame could not be decoded cleanly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{layer} truncated: need {needed} bytes, have {available}")]
    Truncated {
        layer: &'static str,
        needed: usize,
        available: usize,
    },
    #[error("malformed radiotap header")]
    Radiotap,
    #[error("unsupported 802.11 protocol version {0}")]
    UnsupportedVersion(u8),
    #[error("frame check sequence flagged as bad by the capturing driver")]
    BadFcs,
}

/// The 802.11 frame type, bits 2-3 of the frame control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    Management,
    Control,
    Data,
    Extension,
}

impl FrameType {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => FrameType::Management,
            1 => FrameType::Control,
            2 => FrameType::Data,
            _ => FrameType::Extension,
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameType::Management => "Mgmt",
            FrameType::Control => "Ctrl",
            FrameType::Data => "Data",
            FrameType::Extension => "Ext",
        };
        f.write_str(name)
    }
}

/// Up to four addresses of an 802.11 MAC header, in wire order.
///
/// Which ones are present depends on the frame type and the DS bits: an ACK only
/// has `address1`, a data frame between two access points has all four.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WirelessAddresses {
    pub address1: Option<MacAddr>,
    pub address2: Option<MacAddr>,
    pub address3: Option<MacAddr>,
    pub address4: Option<MacAddr>,
}

impl WirelessAddresses {
    /// The present addresses, `address1` first.
    pub fn iter(&self) -> impl Iterator<Item = MacAddr> + '_ {
        [self.address1, self.address2, self.address3, self.address4]
            .into_iter()
            .flatten()
    }
}

/// A decoded 802.11 MAC header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot11Header {
    pub frame_type: FrameType,
    pub subtype: u8,
    pub to_ds: bool,
    pub from_ds: bool,
    pub addresses: WirelessAddresses,
}

impl Dot11Header {
    /// Human readable subtype, e.g. `Beacon` or `QoS Data`.
    pub fn subtype_name(&self) -> &'static str {
        match (self.frame_type, self.subtype) {
            (FrameType::Management, 0x0) => "Association Request",
            (FrameType::Management, 0x1) => "Association Response",
            (FrameType::Management, 0x2) => "Reassociation Request",
            (FrameType::Management, 0x3) => "Reassociation Response",
            (FrameType::Management, 0x4) => "Probe Request",
            (FrameType::Management, 0x5) => "Probe Response",
            (FrameType::Management, 0x8) => "Beacon",
            (FrameType::Management, 0x9) => "ATIM",
            (FrameType::Management, 0xA) => "Disassociation",
            (FrameType::Management, 0xB) => "Authentication",
            (FrameType::Management, 0xC) => "Deauthentication",
            (FrameType::Management, 0xD) => "Action",
            (FrameType::Management, 0xE) => "Action No Ack",
            (FrameType::Control, 0x8) => "Block Ack Request",
            (FrameType::Control, 0x9) => "Block Ack",
            (FrameType::Control, 0xA) => "PS-Poll",
            (FrameType::Control, 0xB) => "RTS",
            (FrameType::Control, 0xC) => "CTS",
            (FrameType::Control, 0xD) => "ACK",
            (FrameType::Control, 0xE) => "CF-End",
            (FrameType::Control, 0xF) => "CF-End+CF-Ack",
            (FrameType::Data, 0x0) => "Data",
            (FrameType::Data, 0x4) => "Null",
            (FrameType::Data, 0x8) => "QoS Data",
            (FrameType::Data, 0xC) => "QoS Null",
            _ => "Other",
        }
    }
}

/// A single frame read from a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// 1-based position of the frame in the capture.
    pub number: u64,
    /// Capture time in microseconds since the Unix epoch.
    pub timestamp_us: i64,
    pub captured_len: u32,
    pub original_len: u32,
    pub error: Option<DecodeError>,
    pub header: Option<Dot11Header>,
}

impl FrameRecord {
    /// The 802.11 header, if the frame has one and decoded without errors.
    pub fn wireless_header(&self) -> Option<&Dot11Header> {
        match self.error {
            Some(_) => None,
            None => self.header.as_ref(),
        }
    }
}

impl fmt::Display for FrameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.timestamp_us.div_euclid(1_000_000);
        let micros = self.timestamp_us.rem_euclid(1_000_000);
        write!(
            f,
            "#{} {secs}.{micros:06} {}/{} bytes",
            self.number, self.captured_len, self.original_len
        )?;

        if let Some(header) = &self.header {
            write!(f, " {} {}", header.frame_type, header.subtype_name())?;
            match (header.to_ds, header.from_ds) {
                (true, true) => f.write_str(" ToDS|FromDS")?,
                (true, false) => f.write_str(" ToDS")?,
                (false, true) => f.write_str(" FromDS")?,
                (false, false) => {}
            }
            for (role, addr) in [
                ("a1", header.addresses.address1),
                ("a2", header.addresses.address2),
                ("a3", header.addresses.address3),
                ("a4", header.addresses.address4),
            ] {
                if let Some(addr) = addr {
                    write!(f, " {role}={addr}")?;
                }
            }
        }

        if let Some(err) = &self.error {
            write!(f, " [{err}]")?;
        }
        Ok(())
    }
}
