use criterion::{black_box, criterion_group, criterion_main, Criterion};
use datebook::query::{entries_in_next_days, entries_on_date, occurrences_between};
use datebook::{DateRule, Entry, FixedAnnual, FixedDated, MonthName, RelativeWeekday, Weekday};
use jiff::civil::{date, Date};

fn fixed_now() -> Date {
    date(2026, 2, 6)
}

/// A mixed collection of a thousand entries.
fn sample_entries() -> Vec<Entry> {
    (0..1000u32)
        .map(|i| {
            let month = (i % 12 + 1) as u16;
            let day = (i % 28 + 1) as u16;
            let rule: DateRule = match i % 3 {
                0 => FixedAnnual::new(month, day).into(),
                1 => FixedDated::new(month, day, 1900 + (i % 120) as i16).into(),
                _ => RelativeWeekday::new(
                    (i % 4 + 1) as u8,
                    Weekday::ALL[(i % 7) as usize],
                    MonthName::ALL[(i % 12) as usize],
                )
                .into(),
            };
            Entry::new(format!("entry {i}"), rule)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parse benchmarks
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("fixed", |b| {
        b.iter(|| black_box("08/19,1919").parse::<DateRule>().unwrap());
    });

    group.bench_function("relative", |b| {
        b.iter(|| black_box("4ThursdayNov").parse::<DateRule>().unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Query benchmarks
// ---------------------------------------------------------------------------

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let entries = sample_entries();
    let now = fixed_now();

    group.bench_function("next_30_days", |b| {
        b.iter(|| entries_in_next_days(black_box(&entries), now, 30));
    });

    group.bench_function("on_date", |b| {
        b.iter(|| entries_on_date(black_box(&entries), now));
    });

    group.bench_function("between_10_years", |b| {
        b.iter(|| occurrences_between(black_box(&entries), now, date(2036, 2, 6)));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_query);
criterion_main!(benches);
