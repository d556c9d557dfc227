use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Property – the numeric columns a record carries
// ---------------------------------------------------------------------------

/// A numeric column of the steel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Uts,
    YieldStrength,
    Hardness,
    Elongation,
    CarbonAvg,
}

impl Property {
    /// The four mechanical properties exposed as technical filters and charts.
    pub const MECHANICAL: [Property; 4] = [
        Property::Uts,
        Property::YieldStrength,
        Property::Hardness,
        Property::Elongation,
    ];

    /// Read this property from a record.
    pub fn value(self, record: &SteelRecord) -> Option<f64> {
        match self {
            Property::Uts => record.uts,
            Property::YieldStrength => record.yield_strength,
            Property::Hardness => record.hardness,
            Property::Elongation => record.elongation,
            Property::CarbonAvg => record.carbon_avg,
        }
    }

    /// Label with unit, as shown in tables and chart axes.
    pub fn label(self) -> &'static str {
        match self {
            Property::Uts => "UTS (MPa)",
            Property::YieldStrength => "YS (MPa)",
            Property::Hardness => "Hardness (HB)",
            Property::Elongation => "Elongation (%)",
            Property::CarbonAvg => "C_avg (%)",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SteelRecord – one row of the reference table
// ---------------------------------------------------------------------------

/// A single steel grade in a given condition.
///
/// `condition_simple` and `carbon_avg` are derived by [`SteelRecord::new`] and
/// are never recomputed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SteelRecord {
    pub grade: String,
    pub condition: Option<String>,
    pub uts: Option<f64>,
    pub yield_strength: Option<f64>,
    pub hardness: Option<f64>,
    pub elongation: Option<f64>,
    pub carbon_min: Option<f64>,
    pub carbon_max: Option<f64>,
    /// `condition` cut at the first `" at "` and trimmed.
    pub condition_simple: Option<String>,
    /// Midpoint of `carbon_min` and `carbon_max`.
    pub carbon_avg: Option<f64>,
}

/// Source columns of a record, before derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub grade: String,
    pub condition: Option<String>,
    pub uts: Option<f64>,
    pub yield_strength: Option<f64>,
    pub hardness: Option<f64>,
    pub elongation: Option<f64>,
    pub carbon_min: Option<f64>,
    pub carbon_max: Option<f64>,
}

impl SteelRecord {
    /// Build a record from its source columns, computing the derived ones.
    pub fn new(raw: RawRecord) -> Self {
        let condition_simple = raw.condition.as_deref().map(simplify_condition);
        let carbon_avg = match (raw.carbon_min, raw.carbon_max) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            _ => None,
        };
        SteelRecord {
            grade: raw.grade,
            condition: raw.condition,
            uts: raw.uts,
            yield_strength: raw.yield_strength,
            hardness: raw.hardness,
            elongation: raw.elongation,
            carbon_min: raw.carbon_min,
            carbon_max: raw.carbon_max,
            condition_simple,
            carbon_avg,
        }
    }
}

/// Truncate a treatment description at the first `" at "` token.
///
/// `"Q&T at 540 C"` → `"Q&T"`.
pub fn simplify_condition(condition: &str) -> String {
    condition
        .split(" at ")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

// ---------------------------------------------------------------------------
// SteelDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SteelDataset {
    /// All records, in source order.
    pub records: Vec<SteelRecord>,
    /// Distinct `condition_simple` labels, sorted.
    pub treatments: BTreeSet<String>,
    /// Distinct grades in order of first appearance.
    pub grades: Vec<String>,
    /// `(min, max)` of every mechanical property that has at least one defined
    /// value.
    pub bounds: BTreeMap<Property, (f64, f64)>,
}

impl SteelDataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<SteelRecord>) -> Self {
        let treatments: BTreeSet<String> = records
            .iter()
            .filter_map(|r| r.condition_simple.clone())
            .collect();

        let mut grades: Vec<String> = Vec::new();
        for r in &records {
            if !grades.contains(&r.grade) {
                grades.push(r.grade.clone());
            }
        }

        let cached = Property::MECHANICAL
            .into_iter()
            .filter_map(|p| bounds(&records, p).map(|b| (p, b)))
        .collect();

        SteelDataset {
            records,
            treatments,
            grades,
            bounds: cached,
        }
    }

    /// Cached `(min, max)` for a property.
    pub fn bounds(&self, property: Property) -> Option<(f64, f64)> {
        self.bounds.get(&property).copied()
    }

    /// First record of the given grade.
    pub fn first_of_grade(&self, grade: &str) -> Option<&SteelRecord> {
        self.records.iter().find(|r| r.grade == grade)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Smallest and largest defined value of `property`, or `None` if no record
/// defines it.
pub fn bounds(records: &[SteelRecord], property: Property) -> Option<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| property.value(r))
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
