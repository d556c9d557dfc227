use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::SteelRecord;

/// Default file name offered by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "aceros_filtrados.csv";

/// One exported row. Field order is the column order of the file.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    grade: &'a str,
    condition: Option<&'a str>,
    uts: Option<f64>,
    yield_strength: Option<f64>,
    hardness: Option<f64>,
    elongation: Option<f64>,
    carbon_min: Option<f64>,
    carbon_max: Option<f64>,
    carbon_avg: Option<f64>,
    condition_simple: Option<&'a str>,
}

impl<'a> From<&'a SteelRecord> for ExportRow<'a> {
    fn from(r: &'a SteelRecord) -> Self {
        ExportRow {
            grade: &r.grade,
            condition: r.condition.as_deref(),
            uts: r.uts,
            yield_strength: r.yield_strength,
            hardness: r.hardness,
            elongation: r.elongation,
            carbon_min: r.carbon_min,
            carbon_max: r.carbon_max,
            carbon_avg: r.carbon_avg,
            condition_simple: r.condition_simple.as_deref(),
        }
    }
}

/// Column header written by [`write_csv`].
pub const EXPORT_COLUMNS: [&str; 10] = [
    "grade",
    "condition",
    "uts",
    "yield_strength",
    "hardness",
    "elongation",
    "carbon_min",
    "carbon_max",
    "carbon_avg",
    "condition_simple",
];

/// Serialise records as CSV with a header row. Undefined values are written
/// as empty cells.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a SteelRecord>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    // Written explicitly so an empty export still carries the header.
    wtr.write_record(EXPORT_COLUMNS)
        .context("writing CSV header")?;
    for (i, record) in records.into_iter().enumerate() {
        wtr.serialize(ExportRow::from(record))
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// CSV text of `records`.
#[cfg(test)]
fn to_csv_string<'a>(records: impl IntoIterator<Item = &'a SteelRecord>) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).context("CSV output is not UTF-8")
}

/// Write `records` to a CSV file at `path`.
pub fn export_to_path<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a SteelRecord>,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(std::io::BufWriter::new(file), records)
        .with_context(|| format!("exporting to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;
    use crate::data::model::RawRecord;
    use crate::data::sample::sample_records;

    #[test]
    fn header_and_column_order() {
        let records = sample_records();
        let text = to_csv_string(&records[..1]).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("grade,condition,uts,yield_strength,hardness,elongation,carbon_min,carbon_max,carbon_avg,condition_simple")
        );
        assert_eq!(
            lines.next(),
            Some("1020,Hot Rolled,420.0,350.0,120.0,25.0,0.18,0.23,0.20500000000000002,Hot Rolled")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_export_keeps_header() {
        let none: [SteelRecord; 0] = [];
        let text = to_csv_string(&none).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("grade,condition,"));
    }

    #[test]
    fn embedded_delimiters_are_quoted_and_undefined_is_empty() {
        let record = SteelRecord::new(RawRecord {
            grade: "10B21".into(),
            condition: Some("Cold drawn, \"bright\" at 20%".into()),
            ..RawRecord::default()
        });
        let text = to_csv_string([&record]).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "10B21,\"Cold drawn, \"\"bright\"\" at 20%\",,,,,,,,\"Cold drawn, \"\"bright\"\"\""
        );
    }

    #[test]
    fn round_trip_through_loader() {
        let mut records = sample_records();
        records[2].hardness = None;
        let text = to_csv_string(&records).unwrap();
        let parsed = read_csv(text.as_bytes()).unwrap();
        assert_eq!(parsed, records);
    }
}
