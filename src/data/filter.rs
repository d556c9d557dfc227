use std::collections::BTreeSet;

use super::model::{Property, SteelDataset, SteelRecord};

/// The simplified profile shows at most this many recommendations.
pub const SIMPLE_RESULT_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Simplified profile inputs
// ---------------------------------------------------------------------------

/// What the part will be used for.
///
/// Accepted as input but it does not narrow the result set: recommendations
/// depend only on welding intent and hardness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UseCase {
    #[default]
    Construction,
    Tools,
    Furniture,
    MachineParts,
    Blades,
}

impl UseCase {
    pub const ALL: [UseCase; 5] = [
        UseCase::Construction,
        UseCase::Tools,
        UseCase::Furniture,
        UseCase::MachineParts,
        UseCase::Blades,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UseCase::Construction => "Construcción/cercas",
            UseCase::Tools => "Herramientas",
            UseCase::Furniture => "Muebles/estructura",
            UseCase::MachineParts => "Piezas mecánicas",
            UseCase::Blades => "Cuchillos/corte",
        }
    }
}

/// How much the part needs to be welded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeldNeed {
    /// "Sí, mucho": carbon_avg < 0.30
    #[default]
    High,
    /// "Tal vez": carbon_avg < 0.45
    Moderate,
    /// "No": no carbon constraint
    NotNeeded,
}

impl WeldNeed {
    pub const ALL: [WeldNeed; 3] = [WeldNeed::High, WeldNeed::Moderate, WeldNeed::NotNeeded];

    pub fn label(self) -> &'static str {
        match self {
            WeldNeed::High => "Sí, mucho",
            WeldNeed::Moderate => "Tal vez",
            WeldNeed::NotNeeded => "No",
        }
    }

    /// Exclusive upper limit on `carbon_avg`, if any.
    pub fn max_carbon(self) -> Option<f64> {
        match self {
            WeldNeed::High => Some(0.30),
            WeldNeed::Moderate => Some(0.45),
            WeldNeed::NotNeeded => None,
        }
    }
}

/// Hardness constraint derived from the 1–5 level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HardnessBound {
    Below(f64),
    Above(f64),
}

/// Guided-mode selections.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCriteria {
    pub use_case: UseCase,
    pub weld: WeldNeed,
    /// 1 (soft) ..= 5 (hard); values outside are clamped.
    pub hardness_level: u8,
}

impl Default for SimpleCriteria {
    fn default() -> Self {
        Self {
            use_case: UseCase::default(),
            weld: WeldNeed::default(),
            hardness_level: 3,
        }
    }
}

impl SimpleCriteria {
    pub fn hardness_bound(&self) -> Option<HardnessBound> {
        match self.hardness_level.clamp(1, 5) {
            1 | 2 => Some(HardnessBound::Below(180.0)),
            4 | 5 => Some(HardnessBound::Above(220.0)),
            _ => None,
        }
    }

    fn matches(&self, record: &SteelRecord) -> bool {
        if let Some(max_c) = self.weld.max_carbon() {
            match record.carbon_avg {
                Some(c) if c < max_c => {}
                _ => return false,
            }
        }
        match (self.hardness_bound(), record.hardness) {
            (None, _) => true,
            (Some(HardnessBound::Below(limit)), Some(hb)) => hb < limit,
            (Some(HardnessBound::Above(limit)), Some(hb)) => hb > limit,
            (Some(_), None) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Technical profile inputs
// ---------------------------------------------------------------------------

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Pull `min` back down to `max` after it was moved past it.
    pub fn clamp_min(&mut self) {
        if self.min > self.max {
            self.min = self.max;
        }
    }

    /// Pull `max` back up to `min` after it was moved past it.
    pub fn clamp_max(&mut self) {
        if self.max < self.min {
            self.max = self.min;
        }
    }

    /// Undefined values never fall inside a range.
    pub fn contains(&self, value: Option<f64>) -> bool {
        matches!(value, Some(v) if v >= self.min && v <= self.max)
    }
}

/// Slider ranges and treatment selection of the technical mode.
///
/// A property whose range is `None` is unconstrained; this only happens when
/// the dataset defines no value at all for that property.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalCriteria {
    pub uts: Option<ValueRange>,
    pub yield_strength: Option<ValueRange>,
    pub hardness: Option<ValueRange>,
    pub elongation: Option<ValueRange>,
    /// Accepted `condition_simple` values.
    pub treatments: BTreeSet<String>,
}

impl TechnicalCriteria {
    /// Criteria spanning the whole dataset: every range at its bounds, every
    /// treatment selected.
    pub fn from_dataset(dataset: &SteelDataset) -> Self {
        let range = |p: Property| {
            dataset
                .bounds(p)
                .map(|(lo, hi)| ValueRange::new(lo, hi))
        };
        Self {
            uts: range(Property::Uts),
            yield_strength: range(Property::YieldStrength),
            hardness: range(Property::Hardness),
            elongation: range(Property::Elongation),
            treatments: dataset.treatments.clone(),
        }
    }

    pub fn range(&self, property: Property) -> Option<&ValueRange> {
        match property {
            Property::Uts => self.uts.as_ref(),
            Property::YieldStrength => self.yield_strength.as_ref(),
            Property::Hardness => self.hardness.as_ref(),
            Property::Elongation => self.elongation.as_ref(),
            Property::CarbonAvg => None,
        }
    }

    pub fn range_mut(&mut self, property: Property) -> Option<&mut ValueRange> {
        match property {
            Property::Uts => self.uts.as_mut(),
            Property::YieldStrength => self.yield_strength.as_mut(),
            Property::Hardness => self.hardness.as_mut(),
            Property::Elongation => self.elongation.as_mut(),
            Property::CarbonAvg => None,
        }
    }

    fn matches(&self, record: &SteelRecord) -> bool {
        let in_ranges = Property::MECHANICAL.iter().all(|&p| match self.range(p) {
            Some(range) => range.contains(p.value(record)),
            None => true,
        });
        in_ranges
            && record
                .condition_simple
                .as_ref()
                .is_some_and(|t| self.treatments.contains(t))
    }
}

// ---------------------------------------------------------------------------
// Filter entry points
// ---------------------------------------------------------------------------

/// Criteria for one filter invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCriteria {
    Simple(SimpleCriteria),
    Technical(TechnicalCriteria),
}

/// Return indices of records that pass all active predicates, in dataset
/// order.
///
/// A record whose value is undefined for a constrained property fails that
/// predicate. The simplified profile keeps only the first
/// [`SIMPLE_RESULT_LIMIT`] survivors.
pub fn filtered_indices(records: &[SteelRecord], criteria: &FilterCriteria) -> Vec<usize> {
    let passing = records.iter().enumerate().filter(|(_, r)| match criteria {
        FilterCriteria::Simple(c) => c.matches(r),
        FilterCriteria::Technical(c) => c.matches(r),
    });
    match criteria {
        FilterCriteria::Simple(_) => passing.take(SIMPLE_RESULT_LIMIT).map(|(i, _)| i).collect(),
        FilterCriteria::Technical(_) => passing.map(|(i, _)| i).collect(),
    }
}

/// Cloned subsequence of `records` passing `criteria`.
pub fn filter_records(records: &[SteelRecord], criteria: &FilterCriteria) -> Vec<SteelRecord> {
    filtered_indices(records, criteria)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}
