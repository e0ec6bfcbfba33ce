//! Link-layer decapsulation down to the 802.11 MAC header.
//!
//! Only the frame control field and the address fields are decoded. Frame bodies
//! are never looked at.

use espy_common::frame::{DecodeError, Dot11Header, FrameType, WirelessAddresses};
use espy_common::network::mac;
use radiotap::Radiotap;

use super::LinkLayer;

const FCS_LEN: usize = 4;
const PRISM_HEADER_LEN: usize = 144;
const AVS_LENGTH_FIELD_END: usize = 8;

const ADDRESS1_OFFSET: usize = 4;
const ADDRESS2_OFFSET: usize = 10;
const ADDRESS3_OFFSET: usize = 16;
const ADDRESS4_OFFSET: usize = 24;

/// The outcome of decoding one captured frame.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    pub header: Option<Dot11Header>,
    pub error: Option<DecodeError>,
}

impl Decoded {
    fn failed(error: DecodeError) -> Self {
        Self {
            header: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Default)]
struct Encapsulation {
    fcs_present: bool,
    bad_fcs: bool,
}

/// Decodes a frame captured on the given link layer.
///
/// Non-wireless link layers yield neither a header nor an error.
pub fn decode(link: LinkLayer, data: &[u8]) -> Decoded {
    let (payload, encapsulation) = match strip_encapsulation(link, data) {
        Ok(Some(stripped)) => stripped,
        Ok(None) => return Decoded::default(),
        Err(err) => return Decoded::failed(err),
    };

    let payload = if encapsulation.fcs_present && payload.len() >= FCS_LEN {
        &payload[..payload.len() - FCS_LEN]
    } else {
        payload
    };

    match parse_header(payload) {
        Ok(header) => Decoded {
            header: Some(header),
            error: encapsulation.bad_fcs.then_some(DecodeError::BadFcs),
        },
        Err(err) => Decoded::failed(err),
    }
}

fn strip_encapsulation(
    link: LinkLayer,
    data: &[u8],
) -> Result<Option<(&[u8], Encapsulation)>, DecodeError> {
    match link {
        LinkLayer::Ieee80211 => Ok(Some((data, Encapsulation::default()))),
        LinkLayer::Radiotap => {
            let radiotap = Radiotap::from_bytes(data).map_err(|_| DecodeError::Radiotap)?;
            let len = radiotap.header.length;
            let payload = skip(data, len, "radiotap header")?;
            let encapsulation = match radiotap.flags {
                Some(flags) => Encapsulation {
                    fcs_present: flags.fcs,
                    bad_fcs: flags.bad_fcs,
                },
                None => Encapsulation::default(),
            };
            Ok(Some((payload, encapsulation)))
        }
        LinkLayer::Prism => {
            let payload = skip(data, PRISM_HEADER_LEN, "prism header")?;
            Ok(Some((payload, Encapsulation::default())))
        }
        LinkLayer::Avs => {
            if data.len() < AVS_LENGTH_FIELD_END {
                return Err(DecodeError::Truncated {
                    layer: "avs header",
                    needed: AVS_LENGTH_FIELD_END,
                    available: data.len(),
                });
            }
            let len = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;
            let payload = skip(data, len, "avs header")?;
            Ok(Some((payload, Encapsulation::default())))
        }
        LinkLayer::Other(_) => Ok(None),
    }
}

fn skip<'a>(data: &'a [u8], len: usize, layer: &'static str) -> Result<&'a [u8], DecodeError> {
    data.get(len..).ok_or(DecodeError::Truncated {
        layer,
        needed: len,
        available: data.len(),
    })
}

/// Decodes the frame control field and the addresses of an 802.11 MAC header.
pub fn parse_header(data: &[u8]) -> Result<Dot11Header, DecodeError> {
    require(data, ADDRESS2_OFFSET)?;

    let version = data[0] & 0b11;
    if version != 0 {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let frame_type = FrameType::from_bits(data[0] >> 2);
    let subtype = data[0] >> 4;
    let to_ds = data[1] & 0x01 != 0;
    let from_ds = data[1] & 0x02 != 0;

    let count = address_count(frame_type, subtype, to_ds, from_ds);
    let needed = match count {
        1 => ADDRESS2_OFFSET,
        2 => ADDRESS3_OFFSET,
        3 => ADDRESS4_OFFSET,
        _ => ADDRESS4_OFFSET + mac::MAC_LEN,
    };
    require(data, needed)?;

    let offsets = [
        ADDRESS1_OFFSET,
        ADDRESS2_OFFSET,
        ADDRESS3_OFFSET,
        ADDRESS4_OFFSET,
    ];
    let mut found = offsets
        .iter()
        .take(count)
        .map(|offset| mac::read_at(data, *offset));

    let addresses = WirelessAddresses {
        address1: found.next().flatten(),
        address2: found.next().flatten(),
        address3: found.next().flatten(),
        address4: found.next().flatten(),
    };

    Ok(Dot11Header {
        frame_type,
        subtype,
        to_ds,
        from_ds,
        addresses,
    })
}

/// How many address fields the header of a given frame kind carries.
fn address_count(frame_type: FrameType, subtype: u8, to_ds: bool, from_ds: bool) -> usize {
    match frame_type {
        FrameType::Control => match subtype {
            // Trigger, beamforming report poll, NDP announcement, block ack
            // request, block ack, PS-Poll, RTS, CF-End, CF-End+CF-Ack
            0x2 | 0x4 | 0x5 | 0x8 | 0x9 | 0xA | 0xB | 0xE | 0xF => 2,
            _ => 1,
        },
        FrameType::Management | FrameType::Data if to_ds && from_ds => 4,
        FrameType::Management | FrameType::Data => 3,
        FrameType::Extension => 1,
    }
}

fn require(data: &[u8], needed: usize) -> Result<(), DecodeError> {
    if data.len() < needed {
        return Err(DecodeError::Truncated {
            layer: "802.11 header",
            needed,
            available: data.len(),
        });
    }
    Ok(())
}
