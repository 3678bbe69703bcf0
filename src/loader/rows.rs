//! Semicolon-delimited table reader shared by both CSV sources.

use csv::ReaderBuilder;
use hashbrown::HashMap;
use std::io::Read;
use tracing::warn;

use crate::error::Result;

const BOM: char = '\u{feff}';

/// One data row with trimmed header names and trimmed values.
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// 1-based position among the data rows
    pub index: usize,
    fields: HashMap<String, String>,
}

impl Row {
    /// First non-empty value among the candidate column names
    pub fn get(&self, columns: &[&str]) -> Option<&str> {
        columns
            .iter()
            .filter_map(|c| self.fields.get(*c))
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    #[cfg(test)]
    pub fn from_pairs(index: usize, pairs: &[(&str, &str)]) -> Self {
        Self {
            index,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Read every row of a `;`-delimited table with a header line.
///
/// Records the csv crate cannot decode are logged and skipped.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches(BOM).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable CSV row {}: {}", idx + 1, e);
                continue;
            }
        };

        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.trim().to_string()))
            .collect();

        rows.push(Row {
            index: idx + 1,
            fields,
        });
    }

    Ok(rows)
}

/// Parse a finite float, rejecting NaN and infinities
pub fn parse_coordinate(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
