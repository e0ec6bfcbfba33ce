//! # Vendor Device Scanner
//!
//! Walks a frame sequence once, tests every 802.11 address against a
//! [`PrefixTable`], and keeps one entry per matching address.
//!
//! Frames that failed to decode and frames without an 802.11 header are skipped
//! silently; they are expected noise in real traces. When the same address shows
//! up again, the newer frame replaces the stored one.
//!
//! Every positive match is also handed to an optional observer, so callers can
//! log or count sightings as they happen without the scanner knowing how.

use std::collections::HashMap;

use espy_common::frame::FrameRecord;
use espy_common::network::mac;
use espy_common::network::prefix::PrefixTable;
use pnet::util::MacAddr;
use tracing::debug;

/// A matched address and the frame it was last seen in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    pub mac: MacAddr,
    pub frame: FrameRecord,
}

/// Matched devices, keyed by the canonical form of their address.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    entries: HashMap<String, MatchEntry>,
}

impl MatchSet {
    /// Stores `frame` as the sighting of `address`, returning the frame it replaces.
    pub fn record(&mut self, address: MacAddr, frame: &FrameRecord) -> Option<FrameRecord> {
        let entry = MatchEntry {
            mac: address,
            frame: frame.clone(),
        };
        self.entries
            .insert(mac::canonical(&address), entry)
            .map(|previous| previous.frame)
    }

    pub fn get(&self, key: &str) -> Option<&FrameRecord> {
        self.entries.get(key).map(|entry| &entry.frame)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by address.
    pub fn into_sorted(self) -> Vec<(String, MatchEntry)> {
        let mut entries: Vec<(String, MatchEntry)> = self.entries.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

/// Counters describing how much of a trace qualified for matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub frames: u64,
    pub decode_errors: u64,
    pub without_header: u64,
    pub addresses_checked: u64,
    pub matches: u64,
}

impl ScanStats {
    pub fn skipped(&self) -> u64 {
        self.decode_errors + self.without_header
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub matches: MatchSet,
    pub stats: ScanStats,
}

type MatchObserver<'a> = Box<dyn FnMut(&MacAddr, &FrameRecord) + 'a>;

pub struct Scanner<'a> {
    table: &'a PrefixTable,
    on_match: Option<MatchObserver<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(table: &'a PrefixTable) -> Self {
        Self {
            table,
            on_match: None,
        }
    }

    /// Registers a callback fired for every matching address, including repeats.
    pub fn on_match<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&MacAddr, &FrameRecord) + 'a,
    {
        self.on_match = Some(Box::new(observer));
        self
    }

    /// Consumes `frames` front to back and collects the matching devices.
    pub fn scan<I>(mut self, frames: I) -> ScanOutcome
    where
        I: IntoIterator<Item = FrameRecord>,
    {
        let mut outcome = ScanOutcome::default();

        for frame in frames {
            self.inspect(&frame, &mut outcome);
        }

        debug!(
            frames = outcome.stats.frames,
            skipped = outcome.stats.skipped(),
            matches = outcome.stats.matches,
            devices = outcome.matches.len(),
            "Scan finished"
        );
        outcome
    }

    fn inspect(&mut self, frame: &FrameRecord, outcome: &mut ScanOutcome) {
        let stats = &mut outcome.stats;
        stats.frames += 1;

        let Some(header) = frame.wireless_header() else {
            match frame.error {
                Some(_) => stats.decode_errors += 1,
                None => stats.without_header += 1,
            }
            return;
        };

        for address in header.addresses.iter() {
            stats.addresses_checked += 1;
            if !self.table.matches(&mac::octets(&address)) {
                continue;
            }

            stats.matches += 1;
            if let Some(observer) = self.on_match.as_mut() {
                observer(&address, frame);
            }
            outcome.matches.record(address, frame);
        }
    }
}

/// Scans `frames` against `table` without an observer.
pub fn scan<I>(frames: I, table: &PrefixTable) -> MatchSet
where
    I: IntoIterator<Item = FrameRecord>,
{
    Scanner::new(table).scan(frames).matches
}
