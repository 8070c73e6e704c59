//! Frame module for sqlframe
//!
//! A frame is the column-major, analysis-ready shape that query results are
//! materialized into: an ordered list of column names, each owning a vector
//! of values. All columns have the same length.
//!
//! Column names are unique. When a result carries the same name more than
//! once (a join over two tables with an `id` column, say), the name keeps
//! its first position and the later column's values replace the earlier.

use std::fmt;
use std::io::Write;

use crate::error::{GlueError, GlueResult};
use crate::value::Value;

/// Column-major table of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    data: Vec<Vec<Value>>,
    /// Frame column for each position of an incoming row
    slots: Vec<usize>,
}

impl Frame {
    /// Create an empty frame for rows laid out as `columns`
    ///
    /// Repeated names collapse into one frame column.
    pub fn with_columns(columns: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(columns.len());
        let mut slots = Vec::with_capacity(columns.len());
        for name in columns {
            match unique.iter().position(|existing| *existing == name) {
                Some(slot) => slots.push(slot),
                None => {
                    slots.push(unique.len());
                    unique.push(name);
                }
            }
        }
        let data = vec![Vec::new(); unique.len()];
        Frame {
            columns: unique,
            data,
            slots,
        }
    }

    /// Append one row laid out as the columns the frame was created with
    ///
    /// For a repeated name the last value in the row wins.
    pub fn push_row(&mut self, row: Vec<Value>) -> GlueResult<()> {
        if row.len() != self.slots.len() {
            return Err(GlueError::TypeError(format!(
                "row has {} values, frame expects {}",
                row.len(),
                self.slots.len()
            )));
        }
        let mut cells: Vec<Option<Value>> = vec![None; self.columns.len()];
        for (&slot, value) in self.slots.iter().zip(row) {
            cells[slot] = Some(value);
        }
        for (column, cell) in self.data.iter_mut().zip(cells) {
            column.push(cell.unwrap_or(Value::Null));
        }
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values of the named column (first match wins)
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|index| self.data[index].as_slice())
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the frame has no columns at all
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Collect row `index` across all columns
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.height() {
            return None;
        }
        Some(self.data.iter().map(|column| &column[index]).collect())
    }

    /// Write the frame as CSV: header row, then one record per row
    ///
    /// NULL values are written as empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> GlueResult<()> {
        let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
        if self.columns.is_empty() {
            csv_writer.flush()?;
            return Ok(());
        }
        csv_writer.write_record(&self.columns)?;
        for index in 0..self.height() {
            let record: Vec<String> = self
                .data
                .iter()
                .map(|column| match &column[index] {
                    Value::Null => String::new(),
                    value => value.to_string(),
                })
                .collect();
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer))
    }
}
