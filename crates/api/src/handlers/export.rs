//! Streaming CSV download shared by every export action.

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use heroes_core::csv_export::{content_disposition, csv_chunks, CsvRecord, CSV_CONTENT_TYPE};

/// Stream `records` as a CSV attachment named after the entity.
///
/// The header row is always written, so an empty selection downloads a
/// header-only file.
pub fn csv_download<R>(records: Vec<R>) -> Response
where
    R: CsvRecord + Send + 'static,
{
    let body = Body::from_stream(futures::stream::iter(csv_chunks(records)));

    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, content_disposition(R::ENTITY)),
        ],
        body,
    )
        .into_response()
}
