//! Builders for synthetic capture files.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::NamedTempFile;

pub const LINKTYPE_ETHERNET: u16 = 1;
pub const LINKTYPE_IEEE802_11: u16 = 105;
pub const LINKTYPE_RADIOTAP: u16 = 127;

pub const BROADCAST: [u8; 6] = [0xff; 6];
pub const ACCESS_POINT: [u8; 6] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];

/// Radiotap flags: FCS appended to the frame.
pub const FLAG_FCS: u8 = 0x10;
/// Radiotap flags: FCS check failed.
pub const FLAG_BAD_FCS: u8 = 0x40;

/// A bare 802.11 management frame (type 0) of the given subtype.
pub fn management(subtype: u8, a1: [u8; 6], a2: [u8; 6], a3: [u8; 6]) -> Vec<u8> {
    let mut data = vec![subtype << 4, 0x00, 0x00, 0x00];
    data.extend_from_slice(&a1);
    data.extend_from_slice(&a2);
    data.extend_from_slice(&a3);
    data.extend_from_slice(&[0x00, 0x00]);
    data
}

pub fn probe_request(source: [u8; 6]) -> Vec<u8> {
    management(0x4, BROADCAST, source, BROADCAST)
}

/// A data frame with both DS bits set, carrying four addresses.
pub fn wds_data(addresses: [[u8; 6]; 4]) -> Vec<u8> {
    let mut data = vec![0x08, 0x03, 0x00, 0x00];
    for address in &addresses[..3] {
        data.extend_from_slice(address);
    }
    data.extend_from_slice(&[0x00, 0x00]);
    data.extend_from_slice(&addresses[3]);
    data
}

/// Wraps an 802.11 frame in a radiotap header with no fields.
pub fn radiotap(frame: &[u8]) -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00];
    data.extend_from_slice(frame);
    data
}

/// Wraps an 802.11 frame in a radiotap header carrying only the flags field.
/// A dummy FCS is appended when `flags` says one is present.
pub fn radiotap_with_flags(frame: &[u8], flags: u8) -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x09, 0x00, 0x02, 0x00, 0x00, 0x00, flags];
    data.extend_from_slice(frame);
    if flags & FLAG_FCS != 0 {
        data.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    }
    data
}

/// Legacy pcap, little endian, microsecond timestamps.
pub fn pcap(linktype: u16, packets: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();

    data.extend_from_slice(&[0xd4, 0xc3, 0xb2, 0xa1]);
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&4u16.to_le_bytes());
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&65535u32.to_le_bytes());
    data.extend_from_slice(&u32::from(linktype).to_le_bytes());

    for (idx, packet) in packets.iter().enumerate() {
        data.extend_from_slice(&(1_700_000_000 + idx as u32).to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&(packet.len() as u32).to_le_bytes());
        data.extend_from_slice(&(packet.len() as u32).to_le_bytes());
        data.extend_from_slice(packet);
    }

    data
}

/// A pcapng section with one interface per entry of `linktypes`.
/// Packets are `(interface id, bytes)` pairs.
pub fn pcapng(linktypes: &[u16], packets: &[(u32, Vec<u8>)]) -> Vec<u8> {
    let mut data = Vec::new();

    // section header block
    data.extend_from_slice(&0x0a0d0d0au32.to_le_bytes());
    data.extend_from_slice(&28u32.to_le_bytes());
    data.extend_from_slice(&0x1a2b3c4du32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&(-1i64).to_le_bytes());
    data.extend_from_slice(&28u32.to_le_bytes());

    for linktype in linktypes {
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&20u32.to_le_bytes());
        data.extend_from_slice(&linktype.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        // snaplen 0: no limit
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&20u32.to_le_bytes());
    }

    for (idx, (if_id, packet)) in packets.iter().enumerate() {
        let padded = packet.len().div_ceil(4) * 4;
        let total = (32 + padded) as u32;
        let timestamp: u64 = 1_700_000_000_000_000 + idx as u64;

        data.extend_from_slice(&6u32.to_le_bytes());
        data.extend_from_slice(&total.to_le_bytes());
        data.extend_from_slice(&if_id.to_le_bytes());
        data.extend_from_slice(&((timestamp >> 32) as u32).to_le_bytes());
        data.extend_from_slice(&(timestamp as u32).to_le_bytes());
        data.extend_from_slice(&(packet.len() as u32).to_le_bytes());
        data.extend_from_slice(&(packet.len() as u32).to_le_bytes());
        data.extend_from_slice(packet);
        data.resize(data.len() + padded - packet.len(), 0);
        data.extend_from_slice(&total.to_le_bytes());
    }

    data
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

/// Writes `bytes` to a temporary file that lives as long as the handle.
pub fn capture_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
