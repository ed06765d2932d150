use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Date32Array, Float32Array, Float64Array, Int32Array,
    Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use log::{info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{RawRow, RawValue, RecordStore, COL_LOCATION, COL_POSTED_DATE, COL_SALARY_USD};
use super::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an employment dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names (recommended)
/// * `.json`    – `[{ "Location": "...", "Salary (USD)": 1, ... }, ...]`
/// * `.parquet` – one column per source field
pub fn load_file(path: &Path) -> Result<RecordStore> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    };

    let store = build_store(&rows)?;
    info!(
        "Loaded {} records ({} industries, {} countries) from {}",
        store.len(),
        store.industries.len(),
        store.countries.len(),
        path.display()
    );
    Ok(store)
}

/// Normalize raw rows, warning once about cells that could not be used.
pub fn build_store(rows: &[RawRow]) -> Result<RecordStore> {
    if !rows.is_empty() && !rows.iter().any(|r| r.contains_key(COL_LOCATION)) {
        return Err(DatasetError::MissingColumn(COL_LOCATION.to_string()).into());
    }

    let store = RecordStore::from_raw_rows(rows).context("normalizing records")?;

    let bad_salary = count_unusable(rows, COL_SALARY_USD, |v| v.as_salary().is_some());
    let bad_date = count_unusable(rows, COL_POSTED_DATE, |v| v.as_date().is_some());
    if bad_salary > 0 {
        warn!("{bad_salary} rows have a non-numeric '{COL_SALARY_USD}' value");
    }
    if bad_date > 0 {
        warn!("{bad_date} rows have an unparseable '{COL_POSTED_DATE}' value");
    }
    Ok(store)
}

/// Count non-null cells in `col` that `usable` rejects.
fn count_unusable(rows: &[RawRow], col: &str, usable: impl Fn(&RawValue) -> bool) -> usize {
    rows.iter()
        .filter_map(|r| r.get(col))
        .filter(|v| **v != RawValue::Null && !usable(v))
        .count()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one posting per row.
fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if !headers.iter().any(|h| h == COL_LOCATION) {
        return Err(DatasetError::MissingColumn(COL_LOCATION.to_string()).into());
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), csv_cell(value)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// CSV cells stay text; salary and date parsing happen during normalization
/// so labels such as `007` keep their exact spelling.
fn csv_cell(s: &str) -> RawValue {
    if s.trim().is_empty() {
        RawValue::Null
    } else {
        RawValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Location": "Austin, TX, USA", "Industry": "Tech", "Salary (USD)": 120000, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRow> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_raw(val)))
                .collect())
        })
        .collect()
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        other => RawValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per source field.
///
/// Date and timestamp columns (as written by `df.to_parquet()` after
/// `pd.to_datetime`) are reduced to calendar dates.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<(String, Arc<dyn Array>)> = Vec::with_capacity(schema.fields().len());
        for (idx, field) in schema.fields().iter().enumerate() {
            let col = batch.column(idx);
            let col = match col.data_type() {
                DataType::Date64 | DataType::Timestamp(_, _) => cast(col, &DataType::Date32)
                    .with_context(|| format!("casting '{}' to a date column", field.name()))?,
                _ => col.clone(),
            };
            columns.push((field.name().clone(), col));
        }

        for row in 0..batch.num_rows() {
            let raw: RawRow = columns
                .iter()
                .map(|(name, col)| (name.clone(), extract_raw_value(col, row)))
                .collect::<BTreeMap<_, _>>();
            rows.push(raw);
        }
    }

    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_raw_value(col: &Arc<dyn Array>, row: usize) -> RawValue {
    if col.is_null(row) {
        return RawValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => match any.downcast_ref::<StringArray>() {
            Some(s) => RawValue::String(s.value(row).to_string()),
            None => RawValue::Null,
        },
        DataType::LargeUtf8 => RawValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(RawValue::Null, |a| RawValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(RawValue::Null, |a| RawValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(RawValue::Null, |a| RawValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(RawValue::Null, |a| RawValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(RawValue::Null, |a| RawValue::Bool(a.value(row))),
        DataType::Date32 => any
            .downcast_ref::<Date32Array>()
            .and_then(|a| a.value_as_date(row))
            .map_or(RawValue::Null, RawValue::Date),
        other => RawValue::String(format!("{other:?}")),
    }
}
