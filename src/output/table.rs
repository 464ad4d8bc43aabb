//! Fixed-width table output.

use super::{row_cells, ResultWriter};
use crate::scanner::ScanResult;
use std::io::{self, Write};

/// Gap added after every column.
const PADDING: usize = 2;

/// Writes results as a left-aligned, fixed-width table.
///
/// Cells longer than their column are truncated. Without explicit widths,
/// each column is as wide as its header.
pub struct TableWriter<W: Write> {
    out: W,
    headers: Vec<String>,
    widths: Vec<usize>,
}

impl<W: Write> TableWriter<W> {
    /// Create a table writer sized to its headers.
    pub fn new(out: W, headers: &[&str]) -> Self {
        Self {
            out,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            widths: headers.iter().map(|h| h.chars().count()).collect(),
        }
    }

    /// Set fixed column widths.
    pub fn with_widths(mut self, widths: &[usize]) -> Self {
        self.widths = widths.to_vec();
        self
    }

    fn write_cells<S: AsRef<str>>(&mut self, cells: &[S]) -> io::Result<()> {
        for (cell, &width) in cells.iter().zip(&self.widths) {
            let cell: String = cell.as_ref().chars().take(width).collect();
            write!(self.out, "{:<pad$}", cell, pad = width + PADDING)?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> ResultWriter for TableWriter<W> {
    fn write_header(&mut self) -> io::Result<()> {
        let headers = self.headers.clone();
        self.write_cells(&headers)?;

        for &width in &self.widths {
            write!(self.out, "{}", "-".repeat(width + PADDING))?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    fn write_row(&mut self, result: &ScanResult) -> io::Result<()> {
        self.write_cells(&row_cells(result))?;
        self.out.flush()
    }
}
