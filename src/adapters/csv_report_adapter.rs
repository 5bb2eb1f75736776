//! Segmented CSV report adapter.
//!
//! All symbols share one output file: a single header row, then one ranked
//! block per symbol. Blocks after the first are introduced by a
//! `SYMBOL,,,,,` marker row so the sections stay visible when the file is
//! opened in a spreadsheet. Money and percentage fields are prefixed with an
//! apostrophe, forcing spreadsheet imports to keep them as text instead of
//! rounding them.

use crate::domain::error::CrossgridError;
use crate::domain::rank::RankedReport;
use crate::ports::report_port::ReportPort;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

const HEADER: &str = "rank,short,long,final_capital,return_pct,trades\n\n";

pub struct CsvReportAdapter {
    output_path: PathBuf,
    initial_capital: f64,
    buf: String,
}

impl CsvReportAdapter {
    pub fn new(output_path: PathBuf, initial_capital: f64) -> Self {
        Self {
            output_path,
            initial_capital,
            buf: String::from(HEADER),
        }
    }

    #[cfg(test)]
    fn contents(&self) -> &str {
        &self.buf
    }
}

impl ReportPort for CsvReportAdapter {
    fn append(
        &mut self,
        symbol: &str,
        report: &RankedReport,
        is_first: bool,
    ) -> Result<(), CrossgridError> {
        if !is_first {
            let _ = writeln!(self.buf, "{symbol},,,,,\n");
        }

        for (i, entry) in report.entries.iter().enumerate() {
            // f64 Display is shortest round-trip, so the quoted text field
            // loses no precision.
            let _ = writeln!(
                self.buf,
                "{rank},{s},{l},'{capital},'{ret:.4},{trades}",
                rank = i + 1,
                s = entry.short,
                l = entry.long,
                capital = entry.final_capital,
                ret = entry.return_pct(self.initial_capital),
                trades = entry.trades,
            );
        }
        self.buf.push('\n');

        Ok(())
    }

    fn finish(&mut self) -> Result<(), CrossgridError> {
        fs::write(&self.output_path, &self.buf)?;
        Ok(())
    }
}
