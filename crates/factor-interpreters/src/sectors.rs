//! Sector reference tables.
//!
//! Reference multiples and macro-sensitivity placements drift as cycles
//! turn, so the tables are versioned data passed into the interpreters,
//! not globals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Versioned, swappable sector lookup tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorTables {
    pub version: String,
    reference_pe: HashMap<String, f64>,
    macro_sensitivity: HashMap<String, usize>,
    unknown_reference_pe: f64,
    unknown_macro_index: usize,
}

impl SectorTables {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(
        version: impl Into<String>,
        reference_pe: HashMap<String, f64>,
        macro_sensitivity: HashMap<String, usize>,
        unknown_reference_pe: f64,
        unknown_macro_index: usize,
    ) -> Self {
        Self {
            version: version.into(),
            reference_pe,
            macro_sensitivity,
            unknown_reference_pe,
            unknown_macro_index: unknown_macro_index.min(4),
        }
    }

    /// The built-in table revision.
    pub fn builtin() -> Self {
        let reference_pe = HashMap::from([
            ("Technology".to_string(), 28.0),
            ("Communication Services".to_string(), 22.0),
            ("Consumer Cyclical".to_string(), 22.0),
            ("Consumer Defensive".to_string(), 20.0),
            ("Healthcare".to_string(), 24.0),
            ("Financial Services".to_string(), 14.0),
            ("Industrials".to_string(), 20.0),
            ("Energy".to_string(), 12.0),
            ("Utilities".to_string(), 17.0),
            ("Real Estate".to_string(), 16.0),
            ("Basic Materials".to_string(), 14.0),
        ]);

        // Macro-sensitivity severity: 0 = counter-cyclical, 4 = highly exposed.
        let macro_sensitivity = HashMap::from([
            ("Consumer Defensive".to_string(), 1),
            ("Utilities".to_string(), 1),
            ("Healthcare".to_string(), 1),
            ("Technology".to_string(), 2),
            ("Communication Services".to_string(), 2),
            ("Industrials".to_string(), 3),
            ("Financial Services".to_string(), 3),
            ("Consumer Cyclical".to_string(), 3),
            ("Real Estate".to_string(), 3),
            ("Basic Materials".to_string(), 3),
            ("Energy".to_string(), 4),
        ]);

        Self::new("2026-02", reference_pe, macro_sensitivity, 18.0, 2)
    }

    /// Reference P/E multiple for a sector, with the resolved table entry.
    /// Unrecognized or absent sectors resolve to the Unknown entry.
    pub fn reference_pe(&self, sector: Option<&str>) -> (f64, &str) {
        match sector.and_then(|name| self.reference_pe.get_key_value(name)) {
            Some((name, multiple)) => (*multiple, name.as_str()),
            None => (self.unknown_reference_pe, Self::UNKNOWN),
        }
    }

    /// Macro-sensitivity severity index for a sector, with the resolved
    /// table entry. Unrecognized sectors resolve to the Unknown entry.
    pub fn macro_index(&self, sector: &str) -> (usize, &str) {
        match self.macro_sensitivity.get_key_value(sector) {
            Some((name, index)) => ((*index).min(4), name.as_str()),
            None => (self.unknown_macro_index, Self::UNKNOWN),
        }
    }
}

impl Default for SectorTables {
    fn default() -> Self {
        Self::builtin()
    }
}
