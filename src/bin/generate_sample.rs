use std::path::Path;
use std::sync::Arc;

use aceros_fis::data::export::export_to_path;
use aceros_fis::data::model::SteelRecord;
use aceros_fis::data::sample::sample_records;
use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

fn text_column(records: &[SteelRecord], get: impl Fn(&SteelRecord) -> Option<&str>) -> ArrayRef {
    Arc::new(StringArray::from(records.iter().map(get).collect::<Vec<_>>()))
}

fn number_column(records: &[SteelRecord], get: impl Fn(&SteelRecord) -> Option<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(records.iter().map(get).collect::<Vec<_>>()))
}

/// Write `records` as Parquet using the reference sheet's column names.
fn write_parquet(path: &str, records: &[SteelRecord]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("SAE Grade", DataType::Utf8, false),
        Field::new("Condition", DataType::Utf8, true),
        Field::new("UTS (MPa)", DataType::Float64, true),
        Field::new("YS (MPa)", DataType::Float64, true),
        Field::new("Hardness (HB)", DataType::Float64, true),
        Field::new("Elongation (%)", DataType::Float64, true),
        Field::new("C (Min)", DataType::Float64, true),
        Field::new("C (Max)", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text_column(records, |r| Some(r.grade.as_str())),
            text_column(records, |r| r.condition.as_deref()),
            number_column(records, |r| r.uts),
            number_column(records, |r| r.yield_strength),
            number_column(records, |r| r.hardness),
            number_column(records, |r| r.elongation),
            number_column(records, |r| r.carbon_min),
            number_column(records, |r| r.carbon_max),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let records = sample_records();

    export_to_path(Path::new("steel_data.csv"), &records)?;
    write_parquet("steel_data.parquet", &records)?;

    println!(
        "Wrote {} steel records to steel_data.csv and steel_data.parquet",
        records.len()
    );
    Ok(())
}
