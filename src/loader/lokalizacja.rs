//! Coordinate master list (`lokalzacja.csv`).
//!
//! Columns: `ID`, `x` (longitude), `y` (latitude), `Localization` (name).
//! Row order defines the walking sequence.

use hashbrown::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::rows::{parse_coordinate, read_rows};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRow {
    pub id: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// 1-based data row number, used for synthetic names
    pub row: usize,
}

impl CoordinateRow {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Localization {}", self.row))
    }
}

/// Load the master list. A missing file is an error.
pub fn load_coordinate_rows(path: &Path) -> Result<Vec<CoordinateRow>> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let rows = parse_coordinate_rows(file)?;
    info!("Loaded {} points from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn parse_coordinate_rows<R: Read>(reader: R) -> Result<Vec<CoordinateRow>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for row in read_rows(reader)? {
        let Some(id) = row.get(&["ID"]) else {
            debug!("Skipping row {} without ID", row.index);
            continue;
        };

        let lng = row.get(&["x", "X"]).and_then(parse_coordinate);
        let lat = row.get(&["y", "Y"]).and_then(parse_coordinate);
        let (Some(lng), Some(lat)) = (lng, lat) else {
            warn!("Skipping point {} (row {}): invalid coordinates", id, row.index);
            continue;
        };

        if !seen.insert(id.to_string()) {
            warn!("Skipping duplicate point ID {} (row {})", id, row.index);
            continue;
        }

        out.push(CoordinateRow {
            id: id.to_string(),
            name: row
                .get(&["Localization", "Localisation"])
                .map(str::to_string),
            lat,
            lng,
            row: row.index,
        });
    }

    Ok(out)
}
