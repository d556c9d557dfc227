use std::collections::BTreeMap;

use super::model::{Property, SteelRecord};

/// Five-number summary of a sample, as drawn by a box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

/// Summary of `values`, ignoring NaN. `None` for an empty sample.
///
/// Quartiles interpolate linearly between the closest ranks.
pub fn five_number_summary(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    Some(BoxStats {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
        count: sorted.len(),
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Box statistics of `property` for each simplified treatment.
///
/// Records without a treatment or without a value are left out; treatments
/// with no defined value get no entry.
pub fn summary_by_treatment(
    records: &[SteelRecord],
    property: Property,
) -> BTreeMap<String, BoxStats> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in records {
        if let (Some(t), Some(v)) = (&r.condition_simple, property.value(r)) {
            groups.entry(t.clone()).or_default().push(v);
        }
    }
    groups
        .into_iter()
        .filter_map(|(t, vals)| five_number_summary(&vals).map(|s| (t, s)))
        .collect()
}
