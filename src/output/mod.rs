//! Output formatting module.
//!
//! Results are filtered by a [`DisplayMode`] and written one row at a time
//! as they arrive from the engine, either as a fixed-width table or as CSV.

mod csv_format;
mod table;

pub use csv_format::CsvWriter;
pub use table::TableWriter;

use crate::scanner::{ScanResult, Status};
use console::style;
use std::io::{self, Write};

/// Column headers shared by every format.
pub const HEADERS: [&str; 3] = ["IP Address", "Port", "Status"];

/// Column widths used for the table.
pub const TABLE_WIDTHS: [usize; 3] = [25, 10, 10];

/// Which statuses are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Every status.
    All,
    /// Only open ports.
    OpenOnly,
    /// Open and timed-out ports; closed ports are hidden.
    #[default]
    OpenAndTimeout,
}

impl DisplayMode {
    /// Build from the command-line flags; `show_all` wins over `show_open`.
    pub fn from_flags(show_all: bool, show_open: bool) -> Self {
        if show_all {
            Self::All
        } else if show_open {
            Self::OpenOnly
        } else {
            Self::OpenAndTimeout
        }
    }

    /// Whether a result with `status` should be displayed.
    pub fn shows(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::OpenOnly => status == Status::Open,
            Self::OpenAndTimeout => status != Status::Closed,
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width table
    #[default]
    Table,
    /// Comma-separated values
    Csv,
}

/// Row-oriented writer for scan results.
pub trait ResultWriter {
    /// Write the header (and anything that precedes the first row).
    fn write_header(&mut self) -> io::Result<()>;

    /// Write one result.
    fn write_row(&mut self, result: &ScanResult) -> io::Result<()>;
}

/// The cells of a result row, in [`HEADERS`] order.
pub fn row_cells(result: &ScanResult) -> [String; 3] {
    [
        result.target.host.to_string(),
        result.target.port.to_string(),
        result.status.to_string(),
    ]
}

/// Create the writer for `format` over `out`.
pub fn writer_for<'a, W: Write + 'a>(format: OutputFormat, out: W) -> Box<dyn ResultWriter + 'a> {
    match format {
        OutputFormat::Table => Box::new(TableWriter::new(out, &HEADERS).with_widths(&TABLE_WIDTHS)),
        OutputFormat::Csv => Box::new(CsvWriter::new(out, &HEADERS)),
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
