//! Generic CSV export over static field descriptors.
//!
//! Each exportable entity implements [`CsvRecord`], declaring its field
//! names in schema order and rendering one record as canonical text. The
//! exporter never inspects entity types beyond that trait.

use chrono::SecondsFormat;

use crate::error::CoreError;
use crate::types::Timestamp;

/// MIME type of every export response.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// An entity that can be written as one CSV row.
pub trait CsvRecord {
    /// Entity type name, used for the download filename.
    const ENTITY: &'static str;

    /// Declared field names, in schema declaration order.
    const FIELDS: &'static [&'static str];

    /// Field values in the same order as [`Self::FIELDS`].
    fn csv_values(&self) -> Vec<String>;
}

/// `<entity>.csv`
pub fn export_filename(entity: &str) -> String {
    format!("{entity}.csv")
}

/// Value of the `Content-Disposition` header for an export download.
pub fn content_disposition(entity: &str) -> String {
    format!("attachment; filename={}", export_filename(entity))
}

/// Encode a single record, applying standard CSV quoting.
pub fn encode_row<I, T>(values: I) -> Result<Vec<u8>, CoreError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(values)
        .map_err(|e| CoreError::Internal(format!("Failed to encode CSV row: {e}")))?;
    writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("Failed to flush CSV row: {e}")))
}

/// Encoded chunks of an export: the header, then one chunk per record.
///
/// Rows are encoded lazily so a streaming response holds one row at a time.
pub fn csv_chunks<R: CsvRecord>(
    records: Vec<R>,
) -> impl Iterator<Item = Result<Vec<u8>, CoreError>> {
    std::iter::once(encode_row(R::FIELDS.iter()))
        .chain(records.into_iter().map(|r| encode_row(r.csv_values())))
}

// ---------------------------------------------------------------------------
// Canonical text forms
// ---------------------------------------------------------------------------

pub fn text_bool(value: bool) -> String {
    value.to_string()
}

pub fn text_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// NULL renders as an empty cell.
pub fn text_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
