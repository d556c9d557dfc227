use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataError;
use super::model::{RawRecord, SteelDataset, SteelRecord};
use super::sample::sample_dataset;

// ---------------------------------------------------------------------------
// Source columns
// ---------------------------------------------------------------------------

/// A source column of the steel table, matched against file headers by any of
/// its aliases (case-insensitive, surrounding whitespace ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Grade,
    Condition,
    Uts,
    YieldStrength,
    Hardness,
    Elongation,
    CarbonMin,
    CarbonMax,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Grade,
        Column::Condition,
        Column::Uts,
        Column::YieldStrength,
        Column::Hardness,
        Column::Elongation,
        Column::CarbonMin,
        Column::CarbonMax,
    ];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Grade => &["grade", "SAE Grade"],
            Column::Condition => &["condition"],
            Column::Uts => &["uts", "UTS (MPa)"],
            Column::YieldStrength => &["yield_strength", "YS (MPa)"],
            Column::Hardness => &["hardness", "Hardness (HB)"],
            Column::Elongation => &["elongation", "Elongation (%)"],
            Column::CarbonMin => &["carbon_min", "C (Min)"],
            Column::CarbonMax => &["carbon_max", "C (Max)"],
        }
    }

    /// Which column a header names, if any.
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| {
            c.aliases()
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(header))
        })
    }
}

/// Position of each known column in a header row.
#[derive(Debug, Default)]
struct ColumnIndex {
    positions: Vec<(Column, usize)>,
}

impl ColumnIndex {
    fn new<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut positions: Vec<(Column, usize)> = Vec::new();
        for (i, h) in headers.into_iter().enumerate() {
            if let Some(col) = Column::from_header(h) {
                // first occurrence wins
                if !positions.iter().any(|(c, _)| *c == col) {
                    positions.push((col, i));
                }
            }
        }
        Self { positions }
    }

    fn get(&self, column: Column) -> Option<usize> {
        self.positions
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, i)| *i)
    }
}

/// Store one cell into the matching field of a raw record.
fn assign(raw: &mut RawRecord, column: Column, text: Option<String>, number: Option<f64>) {
    match column {
        Column::Grade => raw.grade = text.unwrap_or_default(),
        Column::Condition => raw.condition = text,
        Column::Uts => raw.uts = number,
        Column::YieldStrength => raw.yield_strength = number,
        Column::Hardness => raw.hardness = number,
        Column::Elongation => raw.elongation = number,
        Column::CarbonMin => raw.carbon_min = number,
        Column::CarbonMax => raw.carbon_max = number,
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a steel dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line
/// * `.json`    – `[{ "grade": "1020", "uts": 420, ... }, ...]`
/// * `.parquet` – one column per field, numeric or string typed
pub fn load_file(path: &Path) -> Result<SteelDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    };

    Ok(SteelDataset::from_records(records))
}

/// Load `path`, or the built-in sample table when it cannot be read.
pub fn load_or_sample(path: &Path) -> SteelDataset {
    match load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} steel records from {} with treatments {:?}",
                dataset.len(),
                path.display(),
                dataset.treatments
            );
            dataset
        }
        Err(e) => {
            log::warn!(
                "Could not load {} ({e:#}); using the built-in sample table",
                path.display()
            );
            sample_dataset()
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<SteelRecord>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV text from any reader. Unknown columns are ignored.
///
/// Rows may be shorter or longer than the header; cells past the end of a
/// short row are undefined.
pub fn read_csv<R: std::io::Read>(source: R) -> Result<Vec<SteelRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let index = ColumnIndex::new(reader.headers().context("reading CSV headers")?.iter());

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut raw = RawRecord::default();
        for column in Column::ALL {
            let Some(cell) = index.get(column).and_then(|i| row.get(i)) else {
                continue;
            };
            let text = Some(cell.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            let number = parse_number(cell, row_no, column);
            assign(&mut raw, column, text, number);
        }

        records.push(SteelRecord::new(raw));
    }

    Ok(records)
}

/// Empty, `NaN` and unparseable cells become undefined values.
fn parse_number(cell: &str, row: usize, column: Column) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_nan() => None,
        Ok(v) => Some(v),
        Err(_) => {
            if !matches!(column, Column::Grade | Column::Condition) {
                log::debug!("Row {row}, {column:?}: '{cell}' is not a number");
            }
            None
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "SAE Grade": "1020", "Condition": "Hot Rolled", "UTS (MPa)": 420, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<SteelRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

pub fn read_json(text: &str) -> Result<Vec<SteelRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().ok_or(DataError::JsonNotArray)?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> Result<SteelRecord> {
            let obj = row.as_object().ok_or(DataError::JsonRowNotObject(i))?;
            Ok(SteelRecord::new(json_to_raw(obj)))
        })
        .collect()
}

fn json_to_raw(obj: &Map<String, JsonValue>) -> RawRecord {
    let mut raw = RawRecord::default();
    let mut seen: Vec<Column> = Vec::new();
    for (key, val) in obj {
        let Some(column) = Column::from_header(key) else {
            continue;
        };
        if seen.contains(&column) {
            continue;
        }
        seen.push(column);
        let text = match val {
            JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        };
        let number = match val {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| !v.is_nan());
        assign(&mut raw, column, text, number);
    }
    raw
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one steel record per row.
///
/// String columns feed `grade`/`condition`; Int32, Int64, Float32 and Float64
/// columns feed the numeric fields. Nulls become undefined values.
fn load_parquet(path: &Path) -> Result<Vec<SteelRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let index = ColumnIndex::new(schema.fields().iter().map(|f| f.name().as_str()));

        for row in 0..batch.num_rows() {
            let mut raw = RawRecord::default();
            for column in Column::ALL {
                let Some(i) = index.get(column) else {
                    continue;
                };
                let col = batch.column(i);
                assign(
                    &mut raw,
                    column,
                    extract_text(col, row),
                    extract_number(col, row),
                );
            }
            records.push(SteelRecord::new(raw));
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Cell as text; numbers are formatted so integer grades like `1020` survive.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let text = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        _ => extract_number(col, row).map(|v| v.to_string()),
    };
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn extract_number(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .and_then(|s| s.value(row).trim().parse::<f64>().ok()),
        _ => None,
    };
    value.filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_records;

    #[test]
    fn reads_reference_sheet_headers() {
        let text = "\
SAE Grade,Condition,UTS (MPa),YS (MPa),Hardness (HB),Elongation (%),C (Min),C (Max)
1020,Hot Rolled,420,350,120,25,0.18,0.23
4140,Q&T at 540 C,980,750,290,14,0.38,0.43
";
        let records = read_csv(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], sample_records()[0]);
        assert_eq!(records[1].condition.as_deref(), Some("Q&T at 540 C"));
        assert_eq!(records[1].condition_simple.as_deref(), Some("Q&T"));
    }

    #[test]
    fn missing_columns_and_cells_are_undefined() {
        let text = "grade,uts,notes\n1020,,x\n1045,abc,y\n1541,NaN,z\n";
        let records = read_csv(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.uts.is_none()));
        assert!(records.iter().all(|r| r.condition.is_none()));
        assert!(records.iter().all(|r| r.carbon_avg.is_none()));
    }

    #[test]
    fn short_rows_leave_trailing_values_undefined() {
        let text = "\
grade,condition,uts,hardness,elongation
1020,Hot Rolled,420,120,25
1045,Normalized,570,165
1541,Normalized
";
        let records = read_csv(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].elongation, Some(25.0));
        assert_eq!(records[1].hardness, Some(165.0));
        assert_eq!(records[1].elongation, None);
        assert_eq!(records[2].condition_simple.as_deref(), Some("Normalized"));
        assert_eq!(records[2].uts, None);
    }

    #[test]
    fn short_row_in_file_does_not_trigger_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steel.csv");
        std::fs::write(&path, "grade,uts,elongation\n1020,420,25\n1045,570\n").unwrap();
        let ds = load_or_sample(&path);
        assert_eq!(ds.grades, vec!["1020".to_string(), "1045".to_string()]);
        assert_eq!(ds.records[1].elongation, None);
    }

    #[test]
    fn headers_match_case_insensitively() {
        assert_eq!(Column::from_header("  ys (mpa) "), Some(Column::YieldStrength));
        assert_eq!(Column::from_header("GRADE"), Some(Column::Grade));
        assert_eq!(Column::from_header("C_avg"), None);
    }

    #[test]
    fn reads_json_records() {
        let text = r#"[
            {"SAE Grade": 1020, "Condition": "Hot Rolled", "UTS (MPa)": 420,
             "C (Min)": 0.18, "C (Max)": 0.23, "Hardness (HB)": null},
            {"grade": "4140", "uts": "980"}
        ]"#;
        let records = read_json(text).unwrap();
        assert_eq!(records[0].grade, "1020");
        assert_eq!(records[0].uts, Some(420.0));
        assert_eq!(records[0].hardness, None);
        assert!((records[0].carbon_avg.unwrap() - 0.205).abs() < 1e-12);
        assert_eq!(records[1].uts, Some(980.0));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let err = read_json("{}").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::JsonNotArray)
        ));
        let err = read_json("[1]").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::JsonRowNotObject(0))
        ));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("steel.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn unreadable_source_falls_back_to_sample() {
        let ds = load_or_sample(Path::new("definitely/not/here.csv"));
        assert_eq!(ds.records, sample_records());
    }
}
