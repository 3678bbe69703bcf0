//! Description table (`database.csv`).
//!
//! Columns: `id` (optional), `Name`, `Description`, `GPS ID` (`"lat, lng"`).

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::rows::{parse_coordinate, read_rows};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// `(lat, lng)` from the `GPS ID` column
    pub coordinates: Option<(f64, f64)>,
}

/// Load the description table. A missing file yields no rows.
pub fn load_description_rows(path: &Path) -> Result<Vec<DescriptionRow>> {
    if !path.exists() {
        info!("{} not present, skipping descriptions", path.display());
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let rows = parse_description_rows(file)?;
    info!("Loaded {} description rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn parse_description_rows<R: Read>(reader: R) -> Result<Vec<DescriptionRow>> {
    let mut out = Vec::new();

    for row in read_rows(reader)? {
        let id = row.get(&["id", "ID"]).map(str::to_string);
        let name = row.get(&["Name", "name"]).map(str::to_string);
        if id.is_none() && name.is_none() {
            debug!("Skipping description row {} without id or name", row.index);
            continue;
        }

        let coordinates = row.get(&["GPS ID", "gps id"]).and_then(parse_gps);

        out.push(DescriptionRow {
            id,
            name,
            description: row
                .get(&["Description", "description"])
                .map(str::to_string),
            coordinates,
        });
    }

    Ok(out)
}

/// Parse `"lat, lng"` (comma or semicolon separated) into `(lat, lng)`.
pub fn parse_gps(value: &str) -> Option<(f64, f64)> {
    let normalized = value.replace(';', ",");
    let parts: Vec<&str> = normalized
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [lat, lng] => Some((parse_coordinate(lat)?, parse_coordinate(lng)?)),
        _ => None,
    }
}
