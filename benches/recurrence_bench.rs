// Benchmark for recurrence expansion and overlap scans
// Measures fortnightly, quarterly and month-end series generation

use calendar_engine::models::event::{Event, EventDraft};
use calendar_engine::models::recurrence::{RepeatDescriptor, RepeatType};
use calendar_engine::services::event::overlap::find_overlapping;
use calendar_engine::services::event::recurrence::{expand, expand_draft, ExpansionPolicy};
use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

fn bench_fortnightly_occurrences(c: &mut Criterion) {
    let mut group = c.benchmark_group("fortnightly_occurrences");
    let repeat = RepeatDescriptor::new(RepeatType::Weekly, 2).with_series_id("bench");

    for count in [10usize, 100, 1000].iter() {
        let policy = ExpansionPolicy::new(None, *count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| expand(black_box(anchor()), black_box(&repeat), black_box(&policy)));
        });
    }

    group.finish();
}

fn bench_quarterly_occurrences(c: &mut Criterion) {
    let mut group = c.benchmark_group("quarterly_occurrences");
    let repeat = RepeatDescriptor::new(RepeatType::Monthly, 3);

    for count in [10usize, 100, 400].iter() {
        let policy = ExpansionPolicy::new(None, *count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| expand(black_box(anchor()), black_box(&repeat), black_box(&policy)));
        });
    }

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency_comparison");
    let policy = ExpansionPolicy::new(None, 100);

    for kind in [RepeatType::Daily, RepeatType::Weekly, RepeatType::Monthly, RepeatType::Yearly] {
        let repeat = RepeatDescriptor::new(kind, 1);
        group.bench_function(format!("{}_100", kind), |b| {
            b.iter(|| expand(black_box(anchor()), black_box(&repeat), black_box(&policy)));
        });
    }

    group.finish();
}

fn bench_overlap_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_scan");
    let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

    let mut draft = EventDraft::new("Standup", anchor(), start, end);
    draft.repeat = RepeatDescriptor::new(RepeatType::Daily, 1).with_series_id("bench");
    let events: Vec<Event> = expand_draft(&draft, &ExpansionPolicy::new(None, 500))
        .unwrap()
        .into_iter()
        .enumerate()
        .map(|(i, draft)| Event::from_draft(i.to_string(), draft))
        .collect();
    let candidate = Event::from_draft("candidate", EventDraft::new("Clash", events[250].date, start, end));

    group.bench_function("500_events", |b| {
        b.iter(|| find_overlapping(black_box(&candidate), black_box(&events)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fortnightly_occurrences,
    bench_quarterly_occurrences,
    bench_comparison,
    bench_overlap_scan
);
criterion_main!(benches);
