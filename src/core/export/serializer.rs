//! CSV serialization of result tables
//!
//! Produces the download payload: UTF-8 CSV with a leading byte-order mark
//! so spreadsheet tools pick up the encoding, a header row of column names,
//! then one row per record. The encoding is fully deterministic; the same
//! table always serializes to identical bytes.

use crate::domain::errors::VantageError;
use crate::domain::result::Result;
use crate::domain::table::Table;

/// UTF-8 byte-order mark prepended for spreadsheet compatibility
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serializes a table into a downloadable CSV payload
///
/// # Errors
///
/// Returns a serialization error if the CSV writer fails, which only
/// happens on malformed record widths.
pub fn serialize(table: &Table) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(UTF8_BOM.len() + table.row_count() * 64);
    buf.extend_from_slice(UTF8_BOM);

    let mut writer = csv::Writer::from_writer(buf);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| VantageError::Serialization(e.to_string()))
}
