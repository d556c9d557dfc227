use super::model::{RawRecord, SteelDataset, SteelRecord};

/// (grade, condition, UTS, YS, HB, elongation, C min, C max)
const SAMPLE_ROWS: [(&str, &str, f64, f64, f64, f64, f64, f64); 6] = [
    ("1020", "Hot Rolled", 420.0, 350.0, 120.0, 25.0, 0.18, 0.23),
    ("1045", "Normalized", 570.0, 380.0, 165.0, 20.0, 0.43, 0.50),
    ("1541", "Annealed", 620.0, 430.0, 180.0, 18.0, 0.36, 0.44),
    ("4140", "Q&T", 980.0, 750.0, 290.0, 14.0, 0.38, 0.43),
    ("4150", "Normalized", 760.0, 520.0, 220.0, 16.0, 0.48, 0.53),
    ("5150", "Q&T", 890.0, 650.0, 260.0, 13.0, 0.48, 0.53),
];

/// Built-in table used when no dataset source can be read.
pub fn sample_records() -> Vec<SteelRecord> {
    SAMPLE_ROWS
        .iter()
        .map(|&(grade, condition, uts, ys, hb, elong, c_min, c_max)| {
            SteelRecord::new(RawRecord {
                grade: grade.to_string(),
                condition: Some(condition.to_string()),
                uts: Some(uts),
                yield_strength: Some(ys),
                hardness: Some(hb),
                elongation: Some(elong),
                carbon_min: Some(c_min),
                carbon_max: Some(c_max),
            })
        })
        .collect()
}

pub fn sample_dataset() -> SteelDataset {
    SteelDataset::from_records(sample_records())
}
