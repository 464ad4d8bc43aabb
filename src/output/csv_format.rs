//! CSV output formatting.

use super::{row_cells, ResultWriter};
use crate::scanner::ScanResult;
use std::io::{self, Write};

/// Writes results as CSV, flushing after every record.
pub struct CsvWriter<W: Write> {
    wtr: csv::Writer<W>,
    headers: Vec<String>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a CSV writer with the given header row.
    pub fn new(out: W, headers: &[&str]) -> Self {
        Self {
            wtr: csv::Writer::from_writer(out),
            headers: headers.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl<W: Write> ResultWriter for CsvWriter<W> {
    fn write_header(&mut self) -> io::Result<()> {
        self.wtr.write_record(&self.headers)?;
        self.wtr.flush()
    }

    fn write_row(&mut self, result: &ScanResult) -> io::Result<()> {
        self.wtr.write_record(row_cells(result))?;
        self.wtr.flush()
    }
}
