//! Per-format preparation of decoded payloads.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use calamine::{open_workbook_from_rs, Data, DataType, Range, Reader, Xlsx};
use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use super::error::ExtractError;
use super::formats::{FormatSpec, Preprocess};

/// Content ready to be sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDocument {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

/// Decode a standard-alphabet base64 payload. ASCII whitespace (line
/// wrapping) is ignored.
pub fn decode_payload(encoded: &str) -> Result<Vec<u8>, ExtractError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact.as_bytes())?)
}

pub fn prepare(spec: &FormatSpec, bytes: Vec<u8>) -> Result<PreparedDocument, ExtractError> {
    let data = match spec.strategy {
        Preprocess::Passthrough => bytes,
        Preprocess::CsvText => csv_text(bytes)?.into_bytes(),
        Preprocess::SpreadsheetToCsv => spreadsheet_to_csv(&bytes)?.into_bytes(),
    };

    Ok(PreparedDocument {
        mime_type: spec.model_mime_type,
        data,
    })
}

/// Check that `bytes` is UTF-8 CSV with a header row and return the text as-is.
/// A record may be shorter than the header but not longer.
pub fn csv_text(bytes: Vec<u8>) -> Result<String, ExtractError> {
    let text = String::from_utf8(bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let expected = reader.headers()?.len();
    if expected == 0 {
        return Err(ExtractError::NoColumns("file"));
    }

    let mut rows = 0usize;
    for record in reader.records() {
        let record = record?;
        if record.len() > expected {
            return Err(ExtractError::TooManyFields {
                line: record.position().map_or(0, |pos| pos.line()),
                expected,
                found: record.len(),
            });
        }
        rows += 1;
    }
    debug!(rows, "CSV payload validated");

    Ok(text)
}

/// Serialize the first worksheet of an XLSX workbook as CSV text. The first
/// row is the header row. Columns are counted from A, so blank columns left
/// of the data are kept.
pub fn spreadsheet_to_csv(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractError::Spreadsheet("workbook has no worksheets".to_string()))??;

    if range.is_empty() {
        return Err(ExtractError::NoColumns("first worksheet"));
    }

    let offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let (height, width) = range.get_size();
    let decimal = decimal_columns(&range, width);

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut rows = range.rows();
    if let Some(header) = rows.next() {
        let padding = (0..offset).map(|idx| format!("Unnamed: {}", idx));
        let names = header
            .iter()
            .enumerate()
            .map(|(idx, cell)| match cell_to_string(cell, false) {
                name if name.is_empty() => format!("Unnamed: {}", offset + idx),
                name => name,
            });
        writer.write_record(padding.chain(names))?;
    }
    for row in rows {
        let padding = (0..offset).map(|_| String::new());
        let fields = row
            .iter()
            .zip(&decimal)
            .map(|(cell, &decimal)| cell_to_string(cell, decimal));
        writer.write_record(padding.chain(fields))?;
    }

    debug!(height, width, offset, "Worksheet converted to CSV");

    let data = writer
        .into_inner()
        .map_err(|e| ExtractError::Spreadsheet(e.to_string()))?;
    Ok(String::from_utf8(data)?)
}

/// Mark the columns whose numbers print with a decimal point: below the
/// header they hold only numbers and blanks, and at least one value is
/// fractional or missing.
fn decimal_columns(range: &Range<Data>, width: usize) -> Vec<bool> {
    (0..width)
        .map(|col| {
            let mut numeric = false;
            let mut decimal = false;
            for row in range.rows().skip(1) {
                match row.get(col) {
                    Some(Data::Int(_)) => numeric = true,
                    Some(Data::Float(f)) => {
                        numeric = true;
                        decimal |= f.fract() != 0.0;
                    }
                    Some(Data::Empty) | None => decimal = true,
                    Some(_) => return false,
                }
            }
            numeric && decimal
        })
        .collect()
}

fn cell_to_string(cell: &Data, decimal: bool) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) if decimal => format!("{}.0", i),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if decimal && f.fract() == 0.0 => format!("{:.1}", f),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| cell.to_string()),
        Data::Error(e) => e.to_string(),
    }
}

fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
