//! # Vendor Prefix Table
//!
//! Holds the address prefixes of a single vendor and answers "was this hardware
//! address handed out by them?".
//!
//! A table is built once from a TAB separated listing (see
//! [`espressif::ESPRESSIF_PREFIXES`](crate::network::espressif::ESPRESSIF_PREFIXES))
//! and never changes afterwards. Building it validates every row, so a corrupt
//! listing surfaces as a [`PrefixTableError`] instead of a table that silently
//! misses devices.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::network::espressif::ESPRESSIF_PREFIXES;

/// Width of the organizationally unique identifier part of a MAC address.
pub const OUI_LEN: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrefixError {
    #[error("prefix is {len} bytes long, at most {OUI_LEN} are allowed")]
    TooLong { len: usize },
}

#[derive(Debug, Error)]
pub enum PrefixTableError {
    #[error("row {row}: expected 2 columns, found {count}")]
    ColumnCount { row: usize, count: usize },
    #[error("row {row}: invalid hex prefix {column:?}")]
    InvalidHex {
        row: usize,
        column: String,
        #[source]
        source: hex::FromHexError,
    },
    #[error("row {row}: prefix {column:?} decodes to {len} bytes, at most {OUI_LEN} are allowed")]
    PrefixTooLong { row: usize, column: String, len: usize },
}

/// The leading bytes of a hardware address, at most [`OUI_LEN`] of them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressPrefix {
    bytes: [u8; OUI_LEN],
    len: u8,
}

impl AddressPrefix {
    pub fn new(bytes: &[u8]) -> Result<Self, PrefixError> {
        if bytes.len() > OUI_LEN {
            return Err(PrefixError::TooLong { len: bytes.len() });
        }
        let mut buf = [0u8; OUI_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: buf,
            len: bytes.len() as u8,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when `address` starts with this prefix.
    ///
    /// An address shorter than the prefix never matches. An empty prefix matches
    /// every address.
    pub fn matches(&self, address: &[u8]) -> bool {
        address.starts_with(self.as_bytes())
    }
}

impl fmt::Display for AddressPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for AddressPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressPrefix({self})")
    }
}

/// An ordered, immutable list of vendor prefixes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixTable {
    prefixes: Vec<AddressPrefix>,
}

impl PrefixTable {
    pub fn new(prefixes: Vec<AddressPrefix>) -> Self {
        Self { prefixes }
    }

    /// Builds the table of Espressif Systems prefixes compiled into the binary.
    pub fn espressif() -> Result<Self, PrefixTableError> {
        Self::parse(ESPRESSIF_PREFIXES)
    }

    /// Parses a `hex-prefix<TAB>display-form` listing, one prefix per row.
    ///
    /// Only the first column is interpreted; the display form is carried for
    /// humans reading the listing. Any malformed row rejects the whole listing.
    pub fn parse(text: &str) -> Result<Self, PrefixTableError> {
        let mut prefixes = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let row = idx + 1;
            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() != 2 {
                return Err(PrefixTableError::ColumnCount {
                    row,
                    count: columns.len(),
                });
            }

            let column = columns[0];
            let bytes = hex::decode(column).map_err(|source| PrefixTableError::InvalidHex {
                row,
                column: column.to_string(),
                source,
            })?;
            let prefix = AddressPrefix::new(&bytes).map_err(|err| match err {
                PrefixError::TooLong { len } => PrefixTableError::PrefixTooLong {
                    row,
                    column: column.to_string(),
                    len,
                },
            })?;

            prefixes.push(prefix);
        }

        Ok(Self { prefixes })
    }

    /// True when any prefix in the table matches `address`.
    pub fn matches(&self, address: &[u8]) -> bool {
        self.find(address).is_some()
    }

    /// The first prefix, in table order, that `address` starts with.
    pub fn find(&self, address: &[u8]) -> Option<&AddressPrefix> {
        self.prefixes.iter().find(|prefix| prefix.matches(address))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddressPrefix> {
        self.prefixes.iter()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl FromStr for PrefixTable {
    type Err = PrefixTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
