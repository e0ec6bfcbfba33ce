//! PCAP / PCAPNG capture reader.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use espy_common::frame::FrameRecord;
use flate2::read::GzDecoder;
use pcap_parser::pcapng::Block;
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, PcapBlockOwned, PcapError, PcapNGReader};
use tracing::{debug, warn};

use super::dot11::{self, Decoded};
use super::{CaptureError, LinkLayer};

/// Buffer size for reading capture files (64KB).
const BUFFER_SIZE: usize = 65536;

/// Largest buffer a single oversized block may grow the reader to (64MB).
const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// pcapng `if_tsresol` default: microseconds.
const DEFAULT_TS_RESOL: u8 = 6;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

type Input = Box<dyn Read + Send>;

/// Reader for PCAP and PCAPNG files, with transparent gzip decompression.
pub struct CaptureReader {
    inner: ReaderInner,
    state: ReadState,
}

enum ReaderInner {
    Legacy(LegacyPcapReader<Input>),
    Ng(PcapNGReader<Input>),
}

/// Bookkeeping shared by both container formats.
struct ReadState {
    frame_number: u64,
    nanosecond_timestamps: bool,
    /// Link type from the legacy file header.
    legacy_link: Option<LinkLayer>,
    /// Interfaces declared in the current pcapng section, by interface id.
    interfaces: Vec<Interface>,
    buffer_size: usize,
}

#[derive(Debug, Clone, Copy)]
struct Interface {
    link: LinkLayer,
    ts_resol: u8,
    /// Seconds added to every timestamp of the interface.
    ts_offset: i64,
}

impl CaptureReader {
    /// Open a capture file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CaptureError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let reader = Self::from_reader(Box::new(file))?;
        debug!(path = %path.display(), format = reader.format(), "Opened capture");
        Ok(reader)
    }

    /// Wrap an arbitrary byte stream holding a (possibly gzipped) capture.
    pub fn from_reader(input: Input) -> Result<Self, CaptureError> {
        let (magic, input) = peek_magic(input)?;
        let (magic, input) = if magic.starts_with(&GZIP_MAGIC) {
            peek_magic(Box::new(GzDecoder::new(input)))?
        } else {
            (magic, input)
        };

        match magic {
            // PCAP, microsecond timestamps, either byte order
            [0xd4, 0xc3, 0xb2, 0xa1] | [0xa1, 0xb2, 0xc3, 0xd4] => Self::open_legacy(input, false),
            // PCAP, nanosecond timestamps, either byte order
            [0x4d, 0x3c, 0xb2, 0xa1] | [0xa1, 0xb2, 0x3c, 0x4d] => Self::open_legacy(input, true),
            // PCAPNG section header block
            [0x0a, 0x0d, 0x0d, 0x0a] => Self::open_ng(input),
            _ => Err(CaptureError::InvalidFormat {
                reason: format!("unknown magic number: {magic:02x?}"),
            }),
        }
    }

    fn open_legacy(input: Input, nanosecond_timestamps: bool) -> Result<Self, CaptureError> {
        let reader = LegacyPcapReader::new(BUFFER_SIZE, input).map_err(|e| {
            CaptureError::InvalidFormat {
                reason: format!("failed to parse PCAP header: {e}"),
            }
        })?;

        Ok(Self {
            inner: ReaderInner::Legacy(reader),
            state: ReadState::new(nanosecond_timestamps),
        })
    }

    fn open_ng(input: Input) -> Result<Self, CaptureError> {
        let reader = PcapNGReader::new(BUFFER_SIZE, input).map_err(|e| {
            CaptureError::InvalidFormat {
                reason: format!("failed to parse PCAPNG header: {e}"),
            }
        })?;

        Ok(Self {
            inner: ReaderInner::Ng(reader),
            state: ReadState::new(false),
        })
    }

    pub fn format(&self) -> &'static str {
        match self.inner {
            ReaderInner::Legacy(_) => "pcap",
            ReaderInner::Ng(_) => "pcapng",
        }
    }

    /// Number of frames read so far.
    pub fn frame_count(&self) -> u64 {
        self.state.frame_number
    }

    /// Read and decode the next frame.
    pub fn next_frame(&mut self) -> Result<Option<FrameRecord>, CaptureError> {
        match &mut self.inner {
            ReaderInner::Legacy(reader) => next_frame(reader, &mut self.state),
            ReaderInner::Ng(reader) => next_frame(reader, &mut self.state),
        }
    }

    /// The capture as a lazy frame sequence.
    ///
    /// A read error part way through is logged and ends the sequence; frames
    /// read before it are still yielded.
    pub fn frames(self) -> impl Iterator<Item = FrameRecord> {
        self.map_while(|frame| match frame {
            Ok(frame) => Some(frame),
            Err(err) => {
                warn!(error = %err, "Capture ended early");
                None
            }
        })
    }
}

impl Iterator for CaptureReader {
    type Item = Result<FrameRecord, CaptureError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

fn next_frame<R: PcapReaderIterator>(
    reader: &mut R,
    state: &mut ReadState,
) -> Result<Option<FrameRecord>, CaptureError> {
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                let frame = state.handle(block);
                reader.consume(offset);
                if let Some(frame) = frame {
                    return Ok(Some(frame));
                }
            }
            Err(PcapError::Eof) => return Ok(None),
            Err(PcapError::Incomplete(_)) => {
                reader.refill().map_err(|e| CaptureError::InvalidFormat {
                    reason: format!("refill error: {e}"),
                })?;
            }
            Err(PcapError::BufferTooSmall) => {
                let grown = state.buffer_size.saturating_mul(2);
                if grown > MAX_BUFFER_SIZE || !reader.grow(grown) {
                    return Err(CaptureError::InvalidFormat {
                        reason: format!("block larger than {MAX_BUFFER_SIZE} bytes"),
                    });
                }
                debug!(buffer_size = grown, "Grew capture buffer for oversized block");
                state.buffer_size = grown;
                reader.refill().map_err(|e| CaptureError::InvalidFormat {
                    reason: format!("refill error: {e}"),
                })?;
            }
            Err(e) => {
                return Err(CaptureError::InvalidFormat {
                    reason: format!("parse error: {e}"),
                });
            }
        }
    }
}

impl ReadState {
    fn new(nanosecond_timestamps: bool) -> Self {
        Self {
            frame_number: 0,
            nanosecond_timestamps,
            legacy_link: None,
            interfaces: Vec::new(),
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Updates the link bookkeeping, or decodes a packet block into a frame.
    fn handle(&mut self, block: PcapBlockOwned<'_>) -> Option<FrameRecord> {
        match block {
            PcapBlockOwned::LegacyHeader(header) => {
                self.legacy_link = Some(LinkLayer::from_raw(header.network.0));
                None
            }
            PcapBlockOwned::Legacy(packet) => {
                let fraction = if self.nanosecond_timestamps {
                    i64::from(packet.ts_usec) / 1_000
                } else {
                    i64::from(packet.ts_usec)
                };
                let timestamp_us = i64::from(packet.ts_sec) * 1_000_000 + fraction;
                Some(self.record(
                    self.legacy_link,
                    timestamp_us,
                    packet.caplen,
                    packet.origlen,
                    packet.data,
                ))
            }
            PcapBlockOwned::NG(Block::SectionHeader(_)) => {
                self.interfaces.clear();
                None
            }
            PcapBlockOwned::NG(Block::InterfaceDescription(idb)) => {
                self.interfaces.push(Interface {
                    link: LinkLayer::from_raw(idb.linktype.0),
                    ts_resol: idb.if_tsresol,
                    ts_offset: idb.if_tsoffset as i64,
                });
                None
            }
            PcapBlockOwned::NG(Block::EnhancedPacket(epb)) => {
                let interface = self.interfaces.get(epb.if_id as usize).copied();
                let raw = (u64::from(epb.ts_high) << 32) | u64::from(epb.ts_low);
                let timestamp_us = match interface {
                    Some(interface) => interface.timestamp_us(raw),
                    None => ticks_to_micros(raw, DEFAULT_TS_RESOL),
                };
                let len = (epb.caplen as usize).min(epb.data.len());
                Some(self.record(
                    interface.map(|interface| interface.link),
                    timestamp_us,
                    len as u32,
                    epb.origlen,
                    &epb.data[..len],
                ))
            }
            PcapBlockOwned::NG(Block::SimplePacket(spb)) => {
                let link = self.interfaces.first().map(|interface| interface.link);
                let len = (spb.origlen as usize).min(spb.data.len());
                Some(self.record(link, 0, len as u32, spb.origlen, &spb.data[..len]))
            }
            _ => None,
        }
    }

    fn record(
        &mut self,
        link: Option<LinkLayer>,
        timestamp_us: i64,
        captured_len: u32,
        original_len: u32,
        data: &[u8],
    ) -> FrameRecord {
        self.frame_number += 1;
        let Decoded { header, error } = match link {
            Some(link) => dot11::decode(link, data),
            None => Decoded::default(),
        };

        FrameRecord {
            number: self.frame_number,
            timestamp_us,
            captured_len,
            original_len,
            error,
            header,
        }
    }
}

impl Interface {
    fn timestamp_us(&self, raw: u64) -> i64 {
        ticks_to_micros(raw, self.ts_resol).saturating_add(self.ts_offset.saturating_mul(1_000_000))
    }
}

/// Converts a pcapng timestamp counted in `if_tsresol` units to microseconds.
///
/// The high bit of `ts_resol` selects a power of two instead of a power of ten.
fn ticks_to_micros(raw: u64, ts_resol: u8) -> i64 {
    let exponent = u32::from(ts_resol & 0x7f);
    let raw = u128::from(raw);
    let micros = if ts_resol & 0x80 != 0 {
        raw.saturating_mul(1_000_000).checked_shr(exponent).unwrap_or(0)
    } else if exponent >= 6 {
        10u128
            .checked_pow(exponent - 6)
            .map_or(0, |divisor| raw / divisor)
    } else {
        raw.saturating_mul(10u128.pow(6 - exponent))
    };
    i64::try_from(micros).unwrap_or(i64::MAX)
}

/// Reads the leading chunk of the stream and hands back a stream that still
/// starts with it.
///
/// The pcap readers parse the file header out of their first `read`, so that
/// read must see the whole chunk and not just a few peeked bytes.
fn peek_magic(mut input: Input) -> Result<([u8; 4], Input), CaptureError> {
    let mut head = Vec::with_capacity(BUFFER_SIZE);
    input.by_ref().take(BUFFER_SIZE as u64).read_to_end(&mut head)?;

    let magic: [u8; 4] = match head.get(..4) {
        Some(&[a, b, c, d]) => [a, b, c, d],
        _ => {
            return Err(CaptureError::InvalidFormat {
                reason: "file too short to read magic number".to_string(),
            });
        }
    };

    let input: Input = Box::new(Cursor::new(head).chain(input));
    Ok((magic, input))
}
