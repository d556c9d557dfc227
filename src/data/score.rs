use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::model::SteelRecord;

pub const MAX_SCORE: f64 = 5.0;
pub const UTS_PENALTY: f64 = 2.0;
pub const ELONGATION_PENALTY: f64 = 1.5;
pub const TREATMENT_PENALTY: f64 = 1.0;

const FULL_STAR: char = '★';
const HALF_STAR: char = '⯨';
const EMPTY_STAR: char = '☆';

// ---------------------------------------------------------------------------
// Soft requirements
// ---------------------------------------------------------------------------

/// Soft requirements a record is scored against. Absent fields cost nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Requirements {
    pub uts_min: Option<f64>,
    pub elongation_min: Option<f64>,
    pub treatments: Option<BTreeSet<String>>,
}

/// Match score of one record plus its star rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub stars: String,
}

/// Score `record` against `req`, from 5.0 down to 0.0.
///
/// A check whose record value is undefined is skipped, unlike the filter
/// engine which excludes such records. The treatment check has no value to
/// skip on: a record without a simplified condition is never a member.
pub fn score(record: &SteelRecord, req: &Requirements) -> f64 {
    let mut score = MAX_SCORE;

    if let (Some(min), Some(uts)) = (req.uts_min, record.uts) {
        if uts < min {
            score -= UTS_PENALTY;
        }
    }

    if let (Some(min), Some(elong)) = (req.elongation_min, record.elongation) {
        if elong < min {
            score -= ELONGATION_PENALTY;
        }
    }

    if let Some(treatments) = req.treatments.as_ref().filter(|t| !t.is_empty()) {
        let member = record
            .condition_simple
            .as_ref()
            .is_some_and(|c| treatments.contains(c));
        if !member {
            score -= TREATMENT_PENALTY;
        }
    }

    score.clamp(0.0, MAX_SCORE)
}

/// Render a score as five star slots: full, an optional half, then empty.
pub fn render_stars(score: f64) -> String {
    let score = if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_SCORE)
    };
    let full = score.floor() as usize;
    let half = usize::from(score - score.floor() >= 0.5);
    let empty = 5 - full - half;

    std::iter::repeat(FULL_STAR)
        .take(full)
        .chain(std::iter::repeat(HALF_STAR).take(half))
        .chain(std::iter::repeat(EMPTY_STAR).take(empty))
        .collect()
}

pub fn score_record(record: &SteelRecord, req: &Requirements) -> ScoreResult {
    let score = score(record, req);
    ScoreResult {
        score,
        stars: render_stars(score),
    }
}

/// Indices of `records` ordered by descending score; ties keep dataset order.
pub fn rank(records: &[SteelRecord], req: &Requirements) -> Vec<(usize, ScoreResult)> {
    let mut scored: Vec<(usize, ScoreResult)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i, score_record(r, req)))
        .collect();
    scored.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(Ordering::Equal)
    });
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRecord;
    use crate::data::sample::sample_records;

    fn record(uts: Option<f64>, elong: Option<f64>, condition: Option<&str>) -> SteelRecord {
        SteelRecord::new(RawRecord {
            grade: "T".into(),
            condition: condition.map(str::to_string),
            uts,
            elongation: elong,
            ..RawRecord::default()
        })
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_requirements_is_max_score() {
        let r = record(Some(100.0), Some(1.0), None);
        assert_eq!(score(&r, &Requirements::default()), 5.0);
    }

    #[test]
    fn every_penalty_applies() {
        let r = record(Some(400.0), Some(10.0), Some("Y"));
        let req = Requirements {
            uts_min: Some(500.0),
            elongation_min: Some(15.0),
            treatments: Some(set(&["X"])),
        };
        assert!((score(&r, &req) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn values_at_the_minimum_are_not_penalised() {
        let r = record(Some(500.0), Some(15.0), Some("X"));
        let req = Requirements {
            uts_min: Some(500.0),
            elongation_min: Some(15.0),
            treatments: Some(set(&["X"])),
        };
        assert_eq!(score(&r, &req), 5.0);
    }

    #[test]
    fn undefined_values_skip_their_check() {
        let r = record(None, None, Some("X"));
        let req = Requirements {
            uts_min: Some(500.0),
            elongation_min: Some(15.0),
            treatments: None,
        };
        assert_eq!(score(&r, &req), 5.0);
    }

    #[test]
    fn empty_treatment_set_is_ignored() {
        let r = record(None, None, Some("Y"));
        let req = Requirements {
            treatments: Some(BTreeSet::new()),
            ..Requirements::default()
        };
        assert_eq!(score(&r, &req), 5.0);
    }

    #[test]
    fn missing_condition_is_not_a_member() {
        let r = record(None, None, None);
        let req = Requirements {
            treatments: Some(set(&["X"])),
            ..Requirements::default()
        };
        assert_eq!(score(&r, &req), 4.0);
    }

    #[test]
    fn stars() {
        assert_eq!(render_stars(0.0), "☆☆☆☆☆");
        assert_eq!(render_stars(5.0), "★★★★★");
        assert_eq!(render_stars(2.5), "★★⯨☆☆");
        assert_eq!(render_stars(3.7), "★★★⯨☆");
        assert_eq!(render_stars(3.4), "★★★☆☆");
        assert_eq!(render_stars(0.5), "⯨☆☆☆☆");
        assert_eq!(render_stars(7.0), "★★★★★");
        assert_eq!(render_stars(-1.0), "☆☆☆☆☆");
    }

    #[test]
    fn score_record_renders_its_score() {
        let r = record(Some(400.0), None, Some("X"));
        let req = Requirements {
            uts_min: Some(500.0),
            ..Requirements::default()
        };
        let res = score_record(&r, &req);
        assert_eq!(res.score, 3.0);
        assert_eq!(res.stars, "★★★☆☆");
    }

    #[test]
    fn rank_orders_by_score_then_dataset_order() {
        let records = sample_records();
        let req = Requirements {
            uts_min: Some(800.0),
            ..Requirements::default()
        };
        let order: Vec<usize> = rank(&records, &req).into_iter().map(|(i, _)| i).collect();
        // 4140 and 5150 meet the minimum, the rest lose two points
        assert_eq!(order, vec![3, 5, 0, 1, 2, 4]);
    }
}
