//! CSV export of a visibility report.
//!
//! Fixed column headers; client code downloads/saves the file as-is, so the
//! shape must stay stable across runs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::models::VisibilityResult;

const CSV_HEADERS: &str =
    "keyword,query,intent,brand_mentioned,prominent,score,sentiment,recommendation,data_source";

/// Write the report rows to any sink.
pub fn write_csv<W: Write>(writer: &mut W, results: &[VisibilityResult]) -> Result<(), AppError> {
    writeln!(writer, "{}", CSV_HEADERS)?;

    for result in results {
        let row = [
            escape_field(&result.keyword),
            escape_field(&result.query),
            result.intent.label().to_string(),
            result.brand_mentioned.to_string(),
            result.prominent.to_string(),
            result.score.to_string(),
            result.sentiment.label().to_string(),
            result.recommendation.label().to_string(),
            result.data_source.label().to_string(),
        ];
        writeln!(writer, "{}", row.join(","))?;
    }

    Ok(())
}

/// Write the report to a file path.
pub fn export_to_path(path: &Path, results: &[VisibilityResult]) -> Result<(), AppError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, results)?;
    writer.flush()?;
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, or newline; embedded
/// quotes are doubled per RFC 4180.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
