//! CSV ingestion and point reconciliation.

pub mod database;
pub mod lokalizacja;
pub mod reconcile;
pub mod rows;

use std::path::Path;

pub use database::{load_description_rows, parse_description_rows, DescriptionRow};
pub use lokalizacja::{load_coordinate_rows, parse_coordinate_rows, CoordinateRow};
pub use reconcile::{normalize_name, reconcile, Dataset};

use crate::error::Result;

/// Read both files and merge them. Blocking.
pub fn load_dataset(points_csv: &Path, database_csv: &Path) -> Result<Dataset> {
    let master = load_coordinate_rows(points_csv)?;
    let descriptions = load_description_rows(database_csv)?;
    Ok(reconcile(master, descriptions))
}
