use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{BikeDataset, DayType, Record, Season};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a bike-sharing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one observation per line (the usual export)
/// * `.json`    – `[{ "season": 1, "hr": 0, ... }, ...]`
/// * `.parquet` – flat numeric columns, as written by `df.to_parquet()`
///
/// Column names go through [`canonical_name`] first, so the raw merged
/// export (`season_x`, `mnth_x`, ...) loads the same as a renamed one.
pub fn load_file(path: &Path) -> Result<BikeDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(BikeDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Schema: required columns and the renaming step
// ---------------------------------------------------------------------------

/// The columns every source must provide (after renaming).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Season,
    WorkingDay,
    WeatherSit,
    Temp,
    Month,
    Casual,
    Registered,
    Cnt,
    Hour,
}

impl Column {
    const ALL: [Column; 9] = [
        Column::Season,
        Column::WorkingDay,
        Column::WeatherSit,
        Column::Temp,
        Column::Month,
        Column::Casual,
        Column::Registered,
        Column::Cnt,
        Column::Hour,
    ];

    fn name(self) -> &'static str {
        match self {
            Column::Season => "season",
            Column::WorkingDay => "workingday",
            Column::WeatherSit => "weathersit",
            Column::Temp => "temp",
            Column::Month => "month",
            Column::Casual => "casual",
            Column::Registered => "registered",
            Column::Cnt => "cnt",
            Column::Hour => "hr",
        }
    }
}

/// Map a source header onto the name the rest of the loader expects.
pub fn canonical_name(header: &str) -> &str {
    match header.trim() {
        "season_x" => "season",
        "workingday_x" => "workingday",
        "weathersit_x" => "weathersit",
        "temp_x" => "temp",
        "cnt_x" => "cnt",
        "mnth_x" | "mnth" => "month",
        "casual_x" => "casual",
        "registered_x" => "registered",
        other => other,
    }
}

/// Position of every required column within `headers`; first match wins.
fn resolve_columns(headers: &[&str]) -> Result<[usize; 9], DataError> {
    let mut positions = [0usize; 9];
    for (slot, col) in positions.iter_mut().zip(Column::ALL) {
        *slot = headers
            .iter()
            .position(|h| canonical_name(h) == col.name())
            .ok_or(DataError::MissingColumn(col.name()))?;
    }
    Ok(positions)
}

// ---------------------------------------------------------------------------
// Cell – a single untyped source value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Cell {
    fn as_f64(&self, row: usize, column: Column) -> Result<f64, DataError> {
        match self {
            Cell::Integer(i) => Ok(*i as f64),
            Cell::Float(f) if f.is_finite() => Ok(*f),
            Cell::Float(f) => Err(DataError::invalid(row, column.name(), format!("{f} is not finite"))),
            Cell::Text(s) => Err(DataError::invalid(row, column.name(), format!("'{s}' is not a number"))),
            Cell::Null => Err(DataError::invalid(row, column.name(), "missing value")),
        }
    }

    fn as_i64(&self, row: usize, column: Column) -> Result<i64, DataError> {
        match self {
            Cell::Integer(i) => Ok(*i),
            Cell::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(*f as i64),
            Cell::Float(f) => Err(DataError::invalid(row, column.name(), format!("{f} is not an integer"))),
            other => other.as_f64(row, column).map(|v| v as i64),
        }
    }

    fn in_range<T: TryFrom<i64>>(
        &self,
        row: usize,
        column: Column,
        range: std::ops::RangeInclusive<i64>,
    ) -> Result<T, DataError> {
        let v = self.as_i64(row, column)?;
        if !range.contains(&v) {
            return Err(DataError::invalid(
                row,
                column.name(),
                format!("{v} is outside {}..={}", range.start(), range.end()),
            ));
        }
        T::try_from(v).map_err(|_| DataError::invalid(row, column.name(), format!("{v} does not fit")))
    }
}

fn guess_cell_type(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() {
        return Cell::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Cell::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Cell::Float(f);
    }
    Cell::Text(s.to_string())
}

/// Turn one row of cells into a validated [`Record`]. `row` counts data
/// rows from 1, not including the header.
///
/// `cell` is called with the position of each required column in
/// [`Column::ALL`] order.
fn build_record(row: usize, cell: impl Fn(usize) -> Cell) -> Result<Record, DataError> {
    let season_code = cell(0).as_i64(row, Column::Season)?;
    let season = Season::from_code(season_code)
        .ok_or_else(|| DataError::invalid(row, "season", format!("unknown season code {season_code}")))?;
    let day_code = cell(1).as_i64(row, Column::WorkingDay)?;
    let day_type = DayType::from_code(day_code)
        .ok_or_else(|| DataError::invalid(row, "workingday", format!("expected 0 or 1, got {day_code}")))?;

    Ok(Record {
        season,
        day_type,
        weathersit: cell(2).in_range(row, Column::WeatherSit, 0..=255)?,
        temp: cell(3).as_f64(row, Column::Temp)?,
        month: cell(4).in_range(row, Column::Month, 1..=12)?,
        casual: cell(5).in_range(row, Column::Casual, 0..=i64::from(u32::MAX))?,
        registered: cell(6).in_range(row, Column::Registered, 0..=i64::from(u32::MAX))?,
        cnt: cell(7).in_range(row, Column::Cnt, 0..=i64::from(u32::MAX))?,
        hour: cell(8).in_range(row, Column::Hour, 0..=23)?,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let positions = resolve_columns(&headers.iter().collect::<Vec<_>>())?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row_no = i + 1;
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = build_record(row_no, |slot| {
            guess_cell_type(row.get(positions[slot]).unwrap_or(""))
        })?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(DataError::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row_no = i + 1;
        let obj = row.as_object().ok_or(DataError::NotAnArray)?;
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        let positions = resolve_columns(&keys)?;
        let record = build_record(row_no, |slot| json_cell(obj, keys[positions[slot]]))?;
        records.push(record);
    }
    Ok(records)
}

fn json_cell(obj: &Map<String, JsonValue>, key: &str) -> Cell {
    match obj.get(key) {
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        Some(JsonValue::String(s)) => guess_cell_type(s),
        Some(JsonValue::Bool(b)) => Cell::Integer(i64::from(*b)),
        Some(JsonValue::Null) | None => Cell::Null,
        Some(other) => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Every required column is cast to `Float64` up front, so integer,
/// float and numeric-string encodings all work; cells that fail the
/// cast come through as nulls and are rejected by [`build_record`].
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let positions = resolve_columns(&names)?;

        let columns = positions
            .iter()
            .zip(Column::ALL)
            .map(|(&idx, col)| {
                cast(batch.column(idx).as_ref(), &DataType::Float64)
                    .with_context(|| format!("casting column '{}' to float", col.name()))
            })
            .collect::<Result<Vec<ArrayRef>>>()?;
        let columns = columns
            .iter()
            .map(|arr| {
                arr.as_any()
                    .downcast_ref::<Float64Array>()
                    .context("expected Float64Array after cast")
            })
            .collect::<Result<Vec<&Float64Array>>>()?;

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let record = build_record(offset + row + 1, |slot| {
                let arr = columns[slot];
                if arr.is_null(row) {
                    Cell::Null
                } else {
                    Cell::Float(arr.value(row))
                }
            })?;
            records.push(record);
        }
    }
    Ok(records)
}
