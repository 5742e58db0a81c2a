//! Hero CSV import parsing.
//!
//! The accepted layout is the inverse of the hero export: a header row
//! naming columns, then one hero per row. Columns the export writes but an
//! import cannot honour (`id`, `added_on`, `added_by`, `headshot`) are
//! accepted and ignored so an exported file re-imports unchanged.

use crate::error::CoreError;

pub const REQUIRED_COLUMNS: &[&str] = &["name", "origin"];
pub const OPTIONAL_COLUMNS: &[&str] = &["is_immortal", "category", "benevolence_factor"];
pub const IGNORED_COLUMNS: &[&str] = &["id", "added_on", "added_by", "headshot"];

/// Heroes are immortal unless the file says otherwise.
pub const DEFAULT_IS_IMMORTAL: bool = true;

/// One validated hero row from an import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroImportRow {
    /// 1-based line in the source file, for error reporting.
    pub line: u64,
    pub name: String,
    /// Origin name; must match an existing origin.
    pub origin: String,
    /// Category name; created on demand. `None` leaves the hero uncategorised.
    pub category: Option<String>,
    pub is_immortal: bool,
    pub benevolence_factor: Option<i32>,
}

#[derive(Debug, Default)]
struct ColumnMap {
    name: Option<usize>,
    origin: Option<usize>,
    is_immortal: Option<usize>,
    category: Option<usize>,
    benevolence_factor: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, CoreError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CoreError::Validation("CSV file is empty".to_string()));
        }

        let mut map = ColumnMap::default();
        let mut seen: Vec<String> = Vec::with_capacity(headers.len());

        for (idx, raw) in headers.iter().enumerate() {
            let column = raw.trim().to_ascii_lowercase();
            if seen.contains(&column) {
                return Err(CoreError::Validation(format!(
                    "Duplicate column '{column}' in CSV header"
                )));
            }

            let slot = match column.as_str() {
                "name" => Some(&mut map.name),
                "origin" => Some(&mut map.origin),
                "is_immortal" => Some(&mut map.is_immortal),
                "category" => Some(&mut map.category),
                "benevolence_factor" => Some(&mut map.benevolence_factor),
                c if IGNORED_COLUMNS.contains(&c) => None,
                _ => {
                    return Err(CoreError::Validation(format!(
                        "Unknown column '{raw}' in CSV header. Allowed: {}",
                        allowed_columns().join(", ")
                    )))
                }
            };
            if let Some(slot) = slot {
                *slot = Some(idx);
            }
            seen.push(column);
        }

        for required in REQUIRED_COLUMNS {
            if !seen.iter().any(|c| c == required) {
                return Err(CoreError::Validation(format!(
                    "Missing required column '{required}' in CSV header"
                )));
            }
        }

        Ok(map)
    }
}

fn allowed_columns() -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .chain(OPTIONAL_COLUMNS)
        .chain(IGNORED_COLUMNS)
        .copied()
        .collect()
}

/// Parse and validate a hero import file.
///
/// Fails on the first malformed line; the caller imports all rows or none.
pub fn parse_hero_csv(data: &[u8]) -> Result<Vec<HeroImportRow>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| CoreError::Validation(format!("Unreadable CSV header: {e}")))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| CoreError::Validation(format!("Malformed CSV: {e}")))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows.push(parse_row(&record, &columns, line)?);
    }
    Ok(rows)
}

fn cell<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    line: u64,
) -> Result<HeroImportRow, CoreError> {
    let name = cell(record, columns.name);
    if name.is_empty() {
        return Err(line_error(line, "'name' must not be empty"));
    }

    let origin = cell(record, columns.origin);
    if origin.is_empty() {
        return Err(line_error(line, "'origin' must not be empty"));
    }

    let is_immortal = match cell(record, columns.is_immortal) {
        "" => DEFAULT_IS_IMMORTAL,
        raw => parse_bool(raw)
            .ok_or_else(|| line_error(line, &format!("invalid is_immortal value '{raw}'")))?,
    };

    let benevolence_factor = match cell(record, columns.benevolence_factor) {
        "" => None,
        raw => Some(raw.parse::<i32>().map_err(|_| {
            line_error(line, &format!("invalid benevolence_factor value '{raw}'"))
        })?),
    };

    let category = match cell(record, columns.category) {
        "" => None,
        raw => Some(raw.to_string()),
    };

    Ok(HeroImportRow {
        line,
        name: name.to_string(),
        origin: origin.to_string(),
        category,
        is_immortal,
        benevolence_factor,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn line_error(line: u64, detail: &str) -> CoreError {
    CoreError::Validation(format!("Line {line}: {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn minimal_file_uses_defaults() {
        let rows = parse_hero_csv(b"name,origin\nHawk,Earth\n").unwrap();
        assert_eq!(
            rows,
            vec![HeroImportRow {
                line: 2,
                name: "Hawk".into(),
                origin: "Earth".into(),
                category: None,
                is_immortal: true,
                benevolence_factor: None,
            }]
        );
    }

    #[test]
    fn exported_layout_reimports() {
        let data = b"id,name,is_immortal,category,origin,benevolence_factor,added_on,added_by,headshot\n\
                     3,Nova,false,Flight,Krypton,80,2024-01-01T00:00:00.000000Z,admin,\n";
        let rows = parse_hero_csv(data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Nova");
        assert_eq!(rows[0].category.as_deref(), Some("Flight"));
        assert!(!rows[0].is_immortal);
        assert_eq!(rows[0].benevolence_factor, Some(80));
    }

    #[test]
    fn header_is_case_insensitive() {
        let rows = parse_hero_csv(b" Name , ORIGIN \nA,B\n").unwrap();
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].origin, "B");
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(parse_hero_csv(b"name,origin\n").unwrap().is_empty());
    }

    #[test]
    fn empty_file_is_rejected() {
        assert_matches!(parse_hero_csv(b""), Err(CoreError::Validation(msg)) if msg.contains("empty"));
    }

    #[test]
    fn unknown_column_is_rejected() {
        assert_matches!(
            parse_hero_csv(b"name,origin,power\nA,B,C\n"),
            Err(CoreError::Validation(msg)) if msg.contains("power")
        );
    }

    #[test]
    fn missing_required_column_is_rejected() {
        assert_matches!(
            parse_hero_csv(b"name\nA\n"),
            Err(CoreError::Validation(msg)) if msg.contains("origin")
        );
    }

    #[test]
    fn duplicate_column_is_rejected() {
        assert_matches!(
            parse_hero_csv(b"name,origin,Name\nA,B,C\n"),
            Err(CoreError::Validation(msg)) if msg.contains("Duplicate")
        );
    }

    #[test]
    fn bad_values_report_line() {
        assert_matches!(
            parse_hero_csv(b"name,origin,benevolence_factor\nA,B,1\nC,D,lots\n"),
            Err(CoreError::Validation(msg)) if msg.starts_with("Line 3")
        );
        assert_matches!(
            parse_hero_csv(b"name,origin,is_immortal\nA,B,maybe\n"),
            Err(CoreError::Validation(msg)) if msg.contains("is_immortal")
        );
        assert_matches!(
            parse_hero_csv(b"name,origin\n,B\n"),
            Err(CoreError::Validation(msg)) if msg.contains("'name'")
        );
    }

    #[test]
    fn bool_spellings() {
        for (raw, expected) in [("YES", true), ("1", true), ("No", false), ("0", false)] {
            assert_eq!(parse_bool(raw), Some(expected), "{raw}");
        }
        assert_eq!(parse_bool("y"), None);
    }
}
