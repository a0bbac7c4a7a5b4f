//! Per-population feature table: one row per user, one column per
//! (raw field, statistic) pair, plus the key column.

use std::collections::BTreeSet;
use std::io::Write;

use super::aggregate::UserFeatureRecord;
use crate::error::PipelineError;
use crate::stats::NumericColumn;

/// An ordered collection of user feature records with row-aligned columns.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    keys: Vec<String>,
    column_names: Vec<String>,
    /// Row-major cells aligned to `column_names`; `None` for a feature the
    /// user's record does not define.
    rows: Vec<Vec<Option<f64>>>,
}

impl FeatureTable {
    /// Build a table from per-user records. The `count_column` names the
    /// exported item-count column (e.g. `message_count`, `tracks_count`).
    ///
    /// A record with an empty identifier is structurally invalid and is the
    /// one hard failure in this path.
    pub fn from_records(
        records: &[UserFeatureRecord],
        count_column: &str,
    ) -> Result<Self, PipelineError> {
        let mut names: BTreeSet<String> = BTreeSet::new();
        for record in records {
            if record.id.trim().is_empty() {
                return Err(PipelineError::MissingIdentifier {
                    context: "feature record without a user id".to_string(),
                });
            }
            names.extend(record.features.keys().cloned());
        }
        let mut column_names = vec![count_column.to_string()];
        column_names.extend(names);

        let mut keys = Vec::with_capacity(records.len());
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            keys.push(record.id.clone());
            let mut row = Vec::with_capacity(column_names.len());
            row.push(Some(record.item_count as f64));
            for name in column_names.iter().skip(1) {
                row.push(record.features.get(name).copied());
            }
            rows.push(row);
        }

        Ok(FeatureTable { keys, column_names, rows })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn row_count(&self) -> usize {
        self.keys.len()
    }

    /// Cell lookup by key and column name.
    pub fn get(&self, key: &str, column: &str) -> Option<f64> {
        let row = self.keys.iter().position(|k| k == key)?;
        let col = self.column_names.iter().position(|c| c == column)?;
        self.rows[row][col]
    }

    /// The numeric column slices, in column order.
    pub fn numeric_columns(&self) -> Vec<NumericColumn> {
        self.column_names
            .iter()
            .enumerate()
            .map(|(c, name)| {
                NumericColumn::new(name.clone(), self.rows.iter().map(|r| r[c]).collect())
            })
            .collect()
    }

    /// A copy containing only the rows whose key appears in `keys`, in the
    /// order given. Unknown keys are ignored.
    pub fn select_rows(&self, keys: &[String]) -> FeatureTable {
        let mut out_keys = Vec::new();
        let mut out_rows = Vec::new();
        for key in keys {
            if let Some(i) = self.keys.iter().position(|k| k == key) {
                out_keys.push(self.keys[i].clone());
                out_rows.push(self.rows[i].clone());
            }
        }
        FeatureTable {
            keys: out_keys,
            column_names: self.column_names.clone(),
            rows: out_rows,
        }
    }

    /// Write the table as CSV: header row, one row per user, empty cells
    /// for missing values. The key column is included only when
    /// `include_key` is set (the unidentifiable export drops it).
    pub fn write_csv<W: Write>(&self, writer: W, include_key: bool) -> Result<(), PipelineError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = Vec::new();
        if include_key {
            header.push("id".to_string());
        }
        header.extend(self.column_names.iter().cloned());
        csv_writer.write_record(&header)?;

        for (key, row) in self.keys.iter().zip(&self.rows) {
            let mut record = Vec::new();
            if include_key {
                record.push(key.clone());
            }
            for cell in row {
                record.push(match cell {
                    Some(v) => format_cell(*v),
                    None => String::new(),
                });
            }
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn format_cell(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, count: usize, features: &[(&str, f64)]) -> UserFeatureRecord {
        UserFeatureRecord {
            id: id.to_string(),
            item_count: count,
            features: features.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_table_from_records() {
        let records = vec![
            record("u1", 3, &[("x_mean", 1.0)]),
            record("u2", 5, &[("x_mean", 2.0), ("y_mean", 7.0)]),
        ];
        let table = FeatureTable::from_records(&records, "message_count").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get("u1", "message_count"), Some(3.0));
        assert_eq!(table.get("u2", "y_mean"), Some(7.0));
        // u1 never defined y_mean: missing, not zero.
        assert_eq!(table.get("u1", "y_mean"), None);
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        let records = vec![record("  ", 1, &[])];
        let err = FeatureTable::from_records(&records, "n").unwrap_err();
        assert!(matches!(err, PipelineError::MissingIdentifier { .. }));
    }

    #[test]
    fn test_numeric_columns_are_row_aligned() {
        let records = vec![
            record("u1", 1, &[("x_mean", 1.0)]),
            record("u2", 1, &[("x_mean", 2.0)]),
        ];
        let table = FeatureTable::from_records(&records, "n").unwrap();
        let cols = table.numeric_columns();
        let x = cols.iter().find(|c| c.name == "x_mean").unwrap();
        assert_eq!(x.values, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_select_rows_preserves_given_order() {
        let records = vec![
            record("u1", 1, &[("x_mean", 1.0)]),
            record("u2", 1, &[("x_mean", 2.0)]),
            record("u3", 1, &[("x_mean", 3.0)]),
        ];
        let table = FeatureTable::from_records(&records, "n").unwrap();
        let subset = table.select_rows(&["u3".to_string(), "u1".to_string(), "zz".to_string()]);
        assert_eq!(subset.keys(), &["u3".to_string(), "u1".to_string()]);
    }

    #[test]
    fn test_csv_export_with_and_without_key() {
        let records = vec![record("u1", 2, &[("x_mean", 1.5)])];
        let table = FeatureTable::from_records(&records, "n").unwrap();

        let mut with_key = Vec::new();
        table.write_csv(&mut with_key, true).unwrap();
        let text = String::from_utf8(with_key).unwrap();
        assert!(text.starts_with("id,n,x_mean\n"));
        assert!(text.contains("u1,2,1.5"));

        let mut without_key = Vec::new();
        table.write_csv(&mut without_key, false).unwrap();
        let text = String::from_utf8(without_key).unwrap();
        assert!(text.starts_with("n,x_mean\n"));
        assert!(!text.contains("u1"));
    }
}
