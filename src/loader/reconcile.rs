//! Merge the coordinate master list with the description table.
//!
//! A description row attaches to a master point by exact id, otherwise by
//! normalized name (case-insensitive, whitespace collapsed). The first match
//! wins. Rows that match nothing become new points only when they carry
//! their own coordinates.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use super::database::DescriptionRow;
use super::lokalizacja::CoordinateRow;
use crate::models::Point;

/// Reconciled collection: points in serving order plus the walking sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub points: Vec<Point>,
    /// Master-list ids in file order
    pub sequence: Vec<String>,
}

impl Dataset {
    pub fn get(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }
}

/// Lowercase, trim and collapse inner whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

struct Merger {
    points: Vec<Point>,
    synthetic_name: Vec<bool>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    next_db_index: usize,
}

impl Merger {
    fn push(&mut self, point: Point, synthetic_name: bool) {
        let idx = self.points.len();
        self.by_id.insert(point.id.clone(), idx);
        if !synthetic_name {
            self.by_name.entry(normalize_name(&point.name)).or_insert(idx);
        }
        self.points.push(point);
        self.synthetic_name.push(synthetic_name);
    }

    fn find(&self, row: &DescriptionRow) -> Option<usize> {
        row.id
            .as_deref()
            .and_then(|id| self.by_id.get(id))
            .or_else(|| {
                row.name
                    .as_deref()
                    .and_then(|name| self.by_name.get(&normalize_name(name)))
            })
            .copied()
    }

    fn enrich(&mut self, idx: usize, row: DescriptionRow) {
        let point = &mut self.points[idx];

        if point.description.is_empty() {
            if let Some(description) = row.description {
                point.description = description;
            }
        }

        if self.synthetic_name[idx] {
            if let Some(name) = row.name {
                point.name = name;
                self.synthetic_name[idx] = false;
                self.by_name.entry(normalize_name(&point.name)).or_insert(idx);
            }
        }

        if let Some(id) = row.id {
            if id != point.id && point.fallback_id.is_none() {
                point.fallback_id = Some(id);
            }
        }
    }

    fn free_db_id(&mut self) -> String {
        loop {
            let candidate = format!("db_{}", self.next_db_index);
            self.next_db_index += 1;
            if !self.by_id.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn append(&mut self, row: DescriptionRow, (lat, lng): (f64, f64)) {
        let id = match row.id {
            Some(id) if !self.by_id.contains_key(&id) => id,
            _ => self.free_db_id(),
        };
        let name = row.name.unwrap_or_else(|| id.clone());

        let mut point = Point::new(id, name, lat, lng);
        point.description = row.description.unwrap_or_default();
        self.push(point, false);
    }
}

/// Build the merged collection.
pub fn reconcile(master: Vec<CoordinateRow>, descriptions: Vec<DescriptionRow>) -> Dataset {
    let mut merger = Merger {
        points: Vec::with_capacity(master.len() + descriptions.len()),
        synthetic_name: Vec::new(),
        by_id: HashMap::new(),
        by_name: HashMap::new(),
        next_db_index: 1,
    };

    let mut sequence = Vec::with_capacity(master.len());
    for row in master {
        let name = row.display_name();
        sequence.push(row.id.clone());
        merger.push(Point::new(row.id, name, row.lat, row.lng), row.name.is_none());
    }

    let mut matched = HashSet::new();
    for row in descriptions {
        if let Some(idx) = merger.find(&row) {
            matched.insert(idx);
            merger.enrich(idx, row);
        } else if let Some(coordinates) = row.coordinates {
            merger.append(row, coordinates);
        } else {
            debug!(
                "Dropping description row {:?}/{:?}: no match and no coordinates",
                row.id, row.name
            );
        }
    }

    debug!(
        "Reconciled {} points ({} master, {} enriched)",
        merger.points.len(),
        sequence.len(),
        matched.len()
    );

    Dataset {
        points: merger.points,
        sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master(id: &str, name: Option<&str>, row: usize) -> CoordinateRow {
        CoordinateRow {
            id: id.to_string(),
            name: name.map(str::to_string),
            lat: 50.0 + row as f64 / 100.0,
            lng: 19.0 + row as f64 / 100.0,
            row,
        }
    }

    fn description(
        id: Option<&str>,
        name: Option<&str>,
        text: &str,
        coordinates: Option<(f64, f64)>,
    ) -> DescriptionRow {
        DescriptionRow {
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            description: Some(text.to_string()),
            coordinates,
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Rynek   GŁÓWNY "), "rynek główny");
    }

    #[test]
    fn test_overlapping_ids_do_not_duplicate() {
        let dataset = reconcile(
            vec![master("1", Some("Rynek"), 1), master("2", Some("Wawel"), 2)],
            vec![
                description(Some("1"), Some("Rynek"), "Main square", Some((1.0, 1.0))),
                description(Some("2"), None, "Castle", None),
            ],
        );

        assert_eq!(dataset.points.len(), 2);
        assert_eq!(dataset.sequence, vec!["1", "2"]);
        let rynek = dataset.get("1").unwrap();
        assert_eq!(rynek.description, "Main square");
        // master coordinates win
        assert_eq!(rynek.lat, 50.01);
        assert_eq!(dataset.get("2").unwrap().description, "Castle");
    }

    #[test]
    fn test_master_only_point_has_empty_description() {
        let dataset = reconcile(vec![master("1", Some("Barbakan"), 1)], vec![]);
        assert_eq!(dataset.points.len(), 1);
        assert_eq!(dataset.points[0].description, "");
        assert_eq!(dataset.points[0].fallback_id, None);
    }

    #[test]
    fn test_match_by_name_ignores_case_and_spacing() {
        let dataset = reconcile(
            vec![master("7", Some("Sukiennice"), 1)],
            vec![description(Some("db-42"), Some("  sukiennice "), "Cloth Hall", None)],
        );

        assert_eq!(dataset.points.len(), 1);
        let point = &dataset.points[0];
        assert_eq!(point.description, "Cloth Hall");
        assert_eq!(point.name, "Sukiennice");
        assert_eq!(point.fallback_id.as_deref(), Some("db-42"));
    }

    #[test]
    fn test_first_description_wins() {
        let dataset = reconcile(
            vec![master("1", Some("Rynek"), 1)],
            vec![
                description(None, Some("Rynek"), "first", None),
                description(None, Some("RYNEK"), "second", None),
            ],
        );
        assert_eq!(dataset.points.len(), 1);
        assert_eq!(dataset.points[0].description, "first");
    }

    #[test]
    fn test_synthetic_name_replaced() {
        let dataset = reconcile(
            vec![master("5", None, 3)],
            vec![description(Some("5"), Some("Kościół Mariacki"), "Basilica", None)],
        );
        assert_eq!(dataset.points[0].name, "Kościół Mariacki");
    }

    #[test]
    fn test_unmatched_rows_with_coordinates_are_appended() {
        let dataset = reconcile(
            vec![master("1", Some("Rynek"), 1)],
            vec![
                description(None, Some("Kazimierz"), "District", Some((50.05, 19.94))),
                description(Some("1"), Some("Other"), "enrich", None),
                description(None, None, "nameless", Some((50.1, 19.1))),
                description(None, Some("Nowhere"), "no coords", None),
            ],
        );

        let ids: Vec<&str> = dataset.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "db_1", "db_2"]);
        assert_eq!(dataset.points[1].name, "Kazimierz");
        assert_eq!(dataset.points[1].lat, 50.05);
        assert_eq!(dataset.points[1].lng, 19.94);
        assert_eq!(dataset.points[2].name, "db_2");
        // appended points are not part of the walking sequence
        assert_eq!(dataset.sequence, vec!["1"]);
    }

    #[test]
    fn test_appended_rows_merge_with_each_other() {
        let dataset = reconcile(
            vec![],
            vec![
                description(Some("x"), Some("Kopiec"), "", Some((50.05, 19.89))),
                description(Some("x"), Some("Kopiec"), "Mound", Some((0.0, 0.0))),
            ],
        );
        assert_eq!(dataset.points.len(), 1);
        assert_eq!(dataset.points[0].description, "Mound");
        assert_eq!(dataset.points[0].lat, 50.05);
    }

    #[test]
    fn test_db_ids_skip_taken_ones() {
        let dataset = reconcile(
            vec![master("db_1", Some("Taken"), 1)],
            vec![description(None, Some("New"), "", Some((1.0, 2.0)))],
        );
        assert_eq!(dataset.points[1].id, "db_2");
    }
}
