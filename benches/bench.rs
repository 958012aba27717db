// Criterion benchmarks for Guna Milan

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use guna_milan::core::{resolve_chart, Scorer};
use guna_milan::models::chart::ALL_NAKSHATRAS;
use guna_milan::models::{BirthChart, ChartRecord, SeekerRole};

fn create_candidate(id: usize) -> (String, BirthChart) {
    let nakshatra = ALL_NAKSHATRAS[id % 27];
    let pada = (id % 4) as u8 + 1;
    let chart = BirthChart::derive(nakshatra, pada, id % 5 == 0).unwrap();
    (format!("profile-{}", id), chart)
}

fn bench_score_charts(c: &mut Criterion) {
    let scorer = Scorer::with_default_options();
    let (_, a) = create_candidate(4);
    let (_, b) = create_candidate(13);

    c.bench_function("score_charts", |bench| {
        bench.iter(|| scorer.score_charts(black_box(&a), black_box(&b)));
    });
}

fn bench_resolve_chart(c: &mut Criterion) {
    let record = ChartRecord {
        moon_longitude: Some(217.4),
        mars_house: Some(7),
        ..Default::default()
    };

    c.bench_function("resolve_chart_from_longitude", |b| {
        b.iter(|| resolve_chart(black_box(&record)))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let scorer = Scorer::with_default_options();
    let (_, seeker) = create_candidate(0);

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000, 5000].iter() {
        let candidates: Vec<(String, BirthChart)> =
            (1..=*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_candidates", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    scorer.rank_candidates(
                        black_box("profile-0"),
                        black_box(&seeker),
                        SeekerRole::Groom,
                        black_box(candidates.clone()),
                        black_box(20),
                        black_box(18.0),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score_charts, bench_resolve_chart, bench_ranking);

criterion_main!(benches);
