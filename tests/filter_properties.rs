use std::collections::BTreeSet;

use aceros_fis::data::filter::{
    filter_records, FilterCriteria, SimpleCriteria, TechnicalCriteria, UseCase, ValueRange,
    WeldNeed, SIMPLE_RESULT_LIMIT,
};
use aceros_fis::data::export::write_csv;
use aceros_fis::data::loader::read_csv;
use aceros_fis::data::model::{RawRecord, SteelDataset, SteelRecord};
use aceros_fis::data::score::{score, Requirements};
use proptest::prelude::*;

const TREATMENTS: [&str; 4] = ["Annealed", "Normalized", "Q&T", "Hot Rolled"];

/// Conditions carrying CSV delimiters, quotes and the `" at "` token.
const AWKWARD_CONDITIONS: [&str; 5] = [
    "Cold drawn, stress relieved",
    "\"Bright\" bar",
    "Q&T at 650 C, \"oil\"",
    "Spheroidized at 700 C at 4h",
    "Normalized;air",
];

fn opt_value(lo: f64, hi: f64) -> impl Strategy<Value = Option<f64>> {
    prop_oneof![1 => Just(None), 4 => (lo..hi).prop_map(Some)]
}

fn record_strategy() -> impl Strategy<Value = SteelRecord> {
    (
        (1000u32..9999).prop_map(|g| g.to_string()),
        prop::option::weighted(0.9, prop::sample::select(TREATMENTS.to_vec())),
        opt_value(300.0, 1100.0),
        opt_value(200.0, 900.0),
        opt_value(90.0, 350.0),
        opt_value(5.0, 35.0),
        opt_value(0.05, 0.45),
        opt_value(0.0, 0.15),
    )
        .prop_map(|(grade, condition, uts, ys, hb, elong, c_min, c_span)| {
            SteelRecord::new(RawRecord {
                grade,
                condition: condition.map(|c| format!("{c} at 540 C")),
                uts,
                yield_strength: ys,
                hardness: hb,
                elongation: elong,
                carbon_min: c_min,
                carbon_max: c_min.zip(c_span).map(|(lo, span)| lo + span),
            })
        })
}

fn exported_record_strategy() -> impl Strategy<Value = SteelRecord> {
    let condition = prop_oneof![
        prop::sample::select(TREATMENTS.to_vec()).prop_map(str::to_string),
        prop::sample::select(AWKWARD_CONDITIONS.to_vec()).prop_map(str::to_string),
        "[A-Za-z][A-Za-z ,\"&]{0,12}[A-Za-z]",
    ];
    (record_strategy(), prop::option::weighted(0.8, condition)).prop_map(|(r, condition)| {
        SteelRecord::new(RawRecord {
            grade: r.grade,
            condition,
            uts: r.uts,
            yield_strength: r.yield_strength,
            hardness: r.hardness,
            elongation: r.elongation,
            carbon_min: r.carbon_min,
            carbon_max: r.carbon_max,
        })
    })
}

fn range_strategy() -> impl Strategy<Value = Option<ValueRange>> {
    prop::option::of((0.0f64..1200.0, 0.0f64..1200.0).prop_map(|(a, b)| {
        ValueRange::new(a.min(b), a.max(b))
    }))
}

fn technical_strategy() -> impl Strategy<Value = TechnicalCriteria> {
    (
        range_strategy(),
        range_strategy(),
        range_strategy(),
        range_strategy(),
        prop::sample::subsequence(TREATMENTS.to_vec(), 0..=TREATMENTS.len()),
    )
        .prop_map(|(uts, yield_strength, hardness, elongation, picked)| TechnicalCriteria {
            uts,
            yield_strength,
            hardness,
            elongation,
            treatments: picked.into_iter().map(str::to_string).collect(),
        })
}

fn simple_strategy() -> impl Strategy<Value = SimpleCriteria> {
    (
        prop::sample::select(UseCase::ALL.to_vec()),
        prop::sample::select(WeldNeed::ALL.to_vec()),
        0u8..=6,
    )
        .prop_map(|(use_case, weld, hardness_level)| SimpleCriteria {
            use_case,
            weld,
            hardness_level,
        })
}

fn passes(c: &TechnicalCriteria, r: &SteelRecord) -> bool {
    let in_range = |range: &Option<ValueRange>, v: Option<f64>| match range {
        None => true,
        Some(range) => v.is_some_and(|v| v >= range.min && v <= range.max),
    };
    in_range(&c.uts, r.uts)
        && in_range(&c.yield_strength, r.yield_strength)
        && in_range(&c.hardness, r.hardness)
        && in_range(&c.elongation, r.elongation)
        && r
            .condition_simple
            .as_ref()
            .is_some_and(|t| c.treatments.contains(t))
}

proptest! {
    #[test]
    fn technical_filter_partitions_the_dataset(
        records in prop::collection::vec(record_strategy(), 0..40),
        criteria in technical_strategy(),
    ) {
        let out = filter_records(&records, &FilterCriteria::Technical(criteria.clone()));
        prop_assert!(out.iter().all(|r| passes(&criteria, r)));

        let kept = records.iter().filter(|r| passes(&criteria, r)).count();
        prop_assert_eq!(kept, out.len());

        // stable: kept rows appear in dataset order
        let expected: Vec<SteelRecord> =
            records.iter().filter(|r| passes(&criteria, r)).cloned().collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn filtering_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..40),
        technical in technical_strategy(),
        simple in simple_strategy(),
    ) {
        for criteria in [FilterCriteria::Technical(technical), FilterCriteria::Simple(simple)] {
            let once = filter_records(&records, &criteria);
            let twice = filter_records(&once, &criteria);
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn simple_profile_returns_at_most_three(
        records in prop::collection::vec(record_strategy(), 0..60),
        simple in simple_strategy(),
    ) {
        let out = filter_records(&records, &FilterCriteria::Simple(simple));
        prop_assert!(out.len() <= SIMPLE_RESULT_LIMIT);
    }

    #[test]
    fn default_technical_criteria_keep_complete_rows(
        records in prop::collection::vec(record_strategy(), 0..40),
    ) {
        let ds = SteelDataset::from_records(records);
        let criteria = TechnicalCriteria::from_dataset(&ds);
        let out = filter_records(&ds.records, &FilterCriteria::Technical(criteria.clone()));
        let complete = ds.records.iter().filter(|r| passes(&criteria, r)).count();
        prop_assert_eq!(out.len(), complete);
        // rows defining every mechanical value and a treatment are always kept
        for r in &ds.records {
            let full = r.uts.is_some()
                && r.yield_strength.is_some()
                && r.hardness.is_some()
                && r.elongation.is_some()
                && r.condition_simple.is_some();
            if full {
                prop_assert!(out.contains(r));
            }
        }
    }

    #[test]
    fn score_is_bounded_and_monotone(
        record in record_strategy(),
        uts_min in prop::option::of(300.0f64..1100.0),
        elongation_min in prop::option::of(5.0f64..35.0),
        picked in prop::sample::subsequence(TREATMENTS.to_vec(), 0..=TREATMENTS.len()),
    ) {
        let none = Requirements::default();
        prop_assert_eq!(score(&record, &none), 5.0);

        let treatments: BTreeSet<String> = picked.into_iter().map(str::to_string).collect();
        let steps = [
            Requirements { uts_min, ..Requirements::default() },
            Requirements { uts_min, elongation_min, treatments: None },
            Requirements { uts_min, elongation_min, treatments: Some(treatments) },
        ];
        let mut previous = score(&record, &none);
        for req in &steps {
            let s = score(&record, req);
            prop_assert!((0.0..=5.0).contains(&s));
            prop_assert!(s <= previous);
            previous = s;
        }
    }

    #[test]
    fn exported_csv_reads_back_unchanged(
        records in prop::collection::vec(exported_record_strategy(), 0..30),
    ) {
        let mut buf = Vec::new();
        write_csv(&mut buf, &records).unwrap();
        let parsed = read_csv(buf.as_slice()).unwrap();
        prop_assert_eq!(parsed, records);
    }
}
