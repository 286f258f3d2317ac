//! Tunisian postal code reference table.
//!
//! Maps 4-digit postal codes to their governorate (region) and locality.
//! The data is compiled in and indexed once at startup; entries are never
//! mutated afterwards.

mod table;

use std::collections::HashMap;

/// One assigned postal code with its geographic information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostalCodeEntry {
    pub code: &'static str,
    pub region: &'static str,
    pub location: &'static str,
}

/// Indexed view over the static reference data.
pub struct PostalCodeTable {
    index: HashMap<&'static str, PostalCodeEntry>,
}

impl PostalCodeTable {
    /// Builds the lookup index over the compiled-in entries.
    pub fn load() -> Self {
        let mut index = HashMap::with_capacity(table::ENTRIES.len());
        for &(code, region, location) in table::ENTRIES {
            index.insert(
                code,
                PostalCodeEntry {
                    code,
                    region,
                    location,
                },
            );
        }
        Self { index }
    }

    /// Returns true if the code is an assigned Tunisian postal code.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Looks up region and location for a code.
    pub fn lookup(&self, code: &str) -> Option<&PostalCodeEntry> {
        self.index.get(code)
    }

    /// Number of assigned codes in the table.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
