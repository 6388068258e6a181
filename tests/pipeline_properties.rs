use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use witness_dashboard::data::{
    apply_filters, count_by, summarize, top_n, Dataset, DateRange, FilterSelection, LabelField,
    Record,
};

static EMOTIONS: [&str; 3] = ["Fear", "Anger", "Hope"];
static THEMES: [&str; 3] = ["Raids", "Courts", "Community"];
static SOURCES: [&str; 3] = ["Tribune", "Sun-Times", "WBEZ"];

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
}

fn label(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::sample::select(values).prop_map(str::to_string))
}

fn label_set(values: &'static [&'static str]) -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(values, 0..=values.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

prop_compose! {
    fn record()(
        date in proptest::option::of(0u64..60),
        emotion_label in label(&EMOTIONS),
        thematic_label in label(&THEMES),
        source in label(&SOURCES),
        title in "[a-z ]{0,12}",
    ) -> Record {
        Record {
            title,
            source,
            publication_date: date.map(day),
            emotion_label,
            thematic_label,
            ..Record::default()
        }
    }
}

prop_compose! {
    fn selection()(
        range in proptest::option::of((0u64..60, 0u64..60)),
        emotions in label_set(&EMOTIONS),
        themes in label_set(&THEMES),
        sources in label_set(&SOURCES),
    ) -> FilterSelection {
        FilterSelection {
            date_range: range.map(|(a, b)| DateRange::new(day(a), day(b))),
            emotions,
            themes,
            sources,
        }
    }
}

fn dataset() -> impl Strategy<Value = Dataset> {
    proptest::collection::vec(record(), 0..40).prop_map(Dataset::from_records)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn view_is_ordered_subset(ds in dataset(), sel in selection()) {
        let view = apply_filters(&ds, &sel);
        let indices = view.indices();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(indices.iter().all(|&i| i < ds.len()));
    }

    #[test]
    fn view_holds_exactly_the_matching_records(ds in dataset(), sel in selection()) {
        let view = apply_filters(&ds, &sel);
        let expected: Vec<usize> = ds
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| sel.matches(r))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(view.indices(), expected.as_slice());
    }

    #[test]
    fn filtering_is_idempotent(ds in dataset(), sel in selection()) {
        let view = apply_filters(&ds, &sel);
        prop_assert_eq!(view.refine(&sel), view);
    }

    #[test]
    fn summary_count_matches_view(ds in dataset(), sel in selection()) {
        let view = apply_filters(&ds, &sel);
        let summary = summarize(&view);
        prop_assert_eq!(summary.count, view.len());
        prop_assert!(summary.distinct_source_count <= summary.count);
        prop_assert_eq!(summary.min_date.is_some(), summary.max_date.is_some());
        if let (Some(min), Some(max)) = (summary.min_date, summary.max_date) {
            prop_assert!(min <= max);
        }
    }

    #[test]
    fn category_totals_bounded_by_view(ds in dataset(), sel in selection()) {
        let view = apply_filters(&ds, &sel);
        for field in [LabelField::Emotion, LabelField::Theme] {
            let counts = count_by(&view, field);
            let has_nulls = view.iter().any(|r| field.value_of(r).is_none());
            prop_assert!(counts.total() <= view.len());
            prop_assert_eq!(counts.total() == view.len(), !has_nulls);
            prop_assert!(counts.iter().all(|(_, n)| n >= 1));
        }
    }

    #[test]
    fn aggregates_are_repeatable(ds in dataset(), sel in selection()) {
        let view = apply_filters(&ds, &sel);
        prop_assert_eq!(summarize(&view), summarize(&view));
        prop_assert_eq!(count_by(&view, LabelField::Emotion), count_by(&view, LabelField::Emotion));
    }

    #[test]
    fn top_n_is_a_prefix(ds in dataset(), sel in selection(), n in 0usize..60) {
        let view = apply_filters(&ds, &sel);
        let top = top_n(&view, n);
        prop_assert_eq!(top.len(), n.min(view.len()));
        for (a, b) in top.iter().zip(view.iter()) {
            prop_assert!(std::ptr::eq(*a, b));
        }
    }
}
