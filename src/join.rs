//! Inner join of two per-user feature tables on the key column.
//!
//! Users absent from either side are dropped; the asymmetric population
//! loss is logged so downstream consumers can see it. The joined result
//! keeps one row-aligned numeric projection per source for the correlation
//! engine, plus an export view with or without the key column.

use std::io::Write;

use tracing::info;

use crate::error::PipelineError;
use crate::features::FeatureTable;
use crate::stats::NumericColumn;

/// Result of inner-joining two feature tables.
#[derive(Debug, Clone)]
pub struct JoinedTable {
    /// Keys retained by the join, in left-table order.
    pub keys: Vec<String>,
    left: FeatureTable,
    right: FeatureTable,
}

impl JoinedTable {
    /// Numeric columns of the left source, rows aligned with the join keys.
    pub fn left_columns(&self) -> Vec<NumericColumn> {
        self.left.numeric_columns()
    }

    /// Numeric columns of the right source, rows aligned with the join keys.
    pub fn right_columns(&self) -> Vec<NumericColumn> {
        self.right.numeric_columns()
    }

    /// Write the joined table as CSV. With `include_key` unset this is the
    /// unidentifiable export: the key column is dropped entirely.
    pub fn write_csv<W: Write>(&self, writer: W, include_key: bool) -> Result<(), PipelineError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let left_cols = self.left_columns();
        let right_cols = self.right_columns();

        let mut header = Vec::new();
        if include_key {
            header.push("id".to_string());
        }
        for col in left_cols.iter().chain(&right_cols) {
            header.push(col.name.clone());
        }
        csv_writer.write_record(&header)?;

        for (row, key) in self.keys.iter().enumerate() {
            let mut record = Vec::new();
            if include_key {
                record.push(key.clone());
            }
            for col in left_cols.iter().chain(&right_cols) {
                record.push(match col.values[row] {
                    Some(v) => format!("{v}"),
                    None => String::new(),
                });
            }
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Inner join on the key column, preserving left-table row order.
pub fn inner_join(left: &FeatureTable, right: &FeatureTable) -> JoinedTable {
    let keys: Vec<String> = left
        .keys()
        .iter()
        .filter(|k| right.keys().contains(k))
        .cloned()
        .collect();

    let dropped_left = left.row_count() - keys.len();
    let dropped_right = right.row_count() - keys.len();
    info!(
        retained = keys.len(),
        dropped_left, dropped_right, "inner join on user id"
    );

    JoinedTable {
        left: left.select_rows(&keys),
        right: right.select_rows(&keys),
        keys,
    }
}
