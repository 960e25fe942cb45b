//! Static location table for the Maharashtra districts
//!
//! The table is immutable, built once at startup, and passed explicitly to
//! the components that need it. Lookup is exact-match on the district name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// District name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Immutable name → coordinates table
#[derive(Debug, Clone)]
pub struct LocationTable {
    entries: BTreeMap<String, Location>,
}

impl LocationTable {
    /// Build the table from a list of locations
    #[must_use]
    pub fn new(locations: Vec<Location>) -> Self {
        let entries = locations
            .into_iter()
            .map(|location| (location.name.clone(), location))
            .collect();
        Self { entries }
    }

    /// The fixed table of Maharashtra district coordinates
    #[must_use]
    pub fn maharashtra() -> Self {
        Self::new(vec![
            Location::new("Mumbai", 19.0760, 72.8777),
            Location::new("Pune", 18.5204, 73.8567),
            Location::new("Nagpur", 21.1458, 79.0882),
            Location::new("Nashik", 20.0059, 73.7897),
            Location::new("Aurangabad", 19.8762, 75.3433),
            Location::new("Solapur", 17.6599, 75.9064),
            Location::new("Kolhapur", 16.7050, 74.2433),
            Location::new("Thane", 19.2183, 72.9781),
            Location::new("Navi Mumbai", 19.0330, 73.0297),
            Location::new("Amravati", 20.9320, 77.7523),
            Location::new("Akola", 20.7002, 77.0082),
            Location::new("Ahmednagar", 19.0948, 74.7480),
            Location::new("Jalgaon", 21.0077, 75.5626),
            Location::new("Nanded", 19.1383, 77.3210),
            Location::new("Satara", 17.6805, 74.0183),
            Location::new("Latur", 18.4088, 76.5604),
            Location::new("Chandrapur", 19.9615, 79.2961),
            Location::new("Parbhani", 19.2608, 76.7708),
            Location::new("Yavatmal", 20.3888, 78.1204),
            Location::new("Sangli", 16.8524, 74.5815),
            Location::new("Buldhana", 20.5292, 76.1842),
            Location::new("Dhule", 20.9042, 74.7749),
            Location::new("Beed", 18.9891, 75.7601),
            Location::new("Wardha", 20.7453, 78.6022),
            Location::new("Washim", 20.1120, 77.1428),
            Location::new("Hingoli", 19.7173, 77.1497),
            Location::new("Gadchiroli", 20.1860, 79.9947),
            Location::new("Gondia", 21.4624, 80.1961),
            Location::new("Jalna", 19.8347, 75.8816),
            Location::new("Osmanabad", 18.1867, 76.0358),
            Location::new("Palghar", 19.6967, 72.7698),
            Location::new("Raigad", 18.5158, 73.1822),
            Location::new("Ratnagiri", 16.9902, 73.3120),
            Location::new("Sindhudurg", 16.0039, 73.4644),
        ])
    }

    /// Look up a location by name, failing for names not in the table
    pub fn resolve(&self, name: &str) -> crate::Result<&Location> {
        self.entries
            .get(name)
            .ok_or_else(|| DashboardError::unknown_location(name))
    }

    /// District names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
