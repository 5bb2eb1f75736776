//! Report generation port trait.

use crate::domain::error::CrossgridError;
use crate::domain::rank::RankedReport;

/// Port for writing ranked grid results, one symbol block at a time.
///
/// The first symbol in a multi-symbol run is flagged so implementations can
/// decide whether a section header is needed; the core only guarantees the
/// data and its order.
pub trait ReportPort {
    fn append(
        &mut self,
        symbol: &str,
        report: &RankedReport,
        is_first: bool,
    ) -> Result<(), CrossgridError>;

    /// Flush everything accumulated so far to its destination.
    fn finish(&mut self) -> Result<(), CrossgridError>;
}
