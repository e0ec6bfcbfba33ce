//! # Scan Report
//!
//! Turns a finished scan into the list of unique devices shown to the user,
//! ordered by address and enriched with whatever the vendor registry knows.

use espy_common::frame::FrameRecord;
use espy_common::network::mac;
use espy_common::network::prefix::{AddressPrefix, PrefixTable};
use espy_common::vendors::VendorRepository;

use crate::scanner::{ScanOutcome, ScanStats};

/// One unique matching device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    /// Canonical address string, the key the device was deduplicated under.
    pub mac: String,
    /// The table prefix the address matched.
    pub prefix: Option<AddressPrefix>,
    pub vendor: Option<String>,
    /// The frame the device was last seen in.
    pub frame: FrameRecord,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub sightings: Vec<Sighting>,
    pub stats: ScanStats,
}

impl Report {
    /// Number of unique matched addresses.
    pub fn device_count(&self) -> usize {
        self.sightings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }
}

pub fn build(
    outcome: ScanOutcome,
    table: &PrefixTable,
    vendors: Option<&dyn VendorRepository>,
) -> Report {
    let sightings = outcome
        .matches
        .into_sorted()
        .into_iter()
        .map(|(key, entry)| Sighting {
            mac: key,
            prefix: table.find(&mac::octets(&entry.mac)).copied(),
            vendor: vendors.and_then(|repo| repo.get_vendor(entry.mac)),
            frame: entry.frame,
        })
        .collect();

    Report {
        sightings,
        stats: outcome.stats,
    }
}
