use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sambandh_base::{
    ActivationConfig, BhavaChart, ChartContext, ChartInputs, DashaQuery, DrishtiConfig, Graha,
    compose_dasha, house_activations, nakshatra_from_longitude, navamsa_from_longitude,
    rashi_from_longitude,
};

const CUSPS: [f64; 12] = [
    281.7, 317.2, 352.8, 28.4, 52.9, 77.3, 101.7, 137.2, 172.8, 208.4, 232.9, 257.3,
];
const LONS: [f64; 8] = [115.1, 166.4, 34.4, 133.4, 0.4, 139.4, 89.4, 210.5];

fn sample_context() -> ChartContext {
    match ChartInputs::from_sidereal(LONS, CUSPS) {
        Ok(inputs) => ChartContext::new(&inputs, &DrishtiConfig::default()),
        Err(e) => panic!("bench inputs rejected: {e}"),
    }
}

fn placement_bench(c: &mut Criterion) {
    let lon = 123.456;

    let mut group = c.benchmark_group("placement");
    group.bench_function("rashi", |b| b.iter(|| rashi_from_longitude(black_box(lon))));
    group.bench_function("nakshatra", |b| {
        b.iter(|| nakshatra_from_longitude(black_box(lon)))
    });
    group.bench_function("navamsa", |b| b.iter(|| navamsa_from_longitude(black_box(lon))));
    group.finish();
}

fn bhava_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("bhava");
    group.bench_function("sripati_boundaries", |b| {
        b.iter(|| BhavaChart::from_cusps(black_box(&CUSPS)))
    });
    let chart = BhavaChart::from_cusps(&CUSPS);
    group.bench_function("bhava_of", |b| b.iter(|| chart.bhava_of(black_box(200.0))));
    group.finish();
}

fn context_bench(c: &mut Criterion) {
    let inputs = match ChartInputs::from_sidereal(LONS, CUSPS) {
        Ok(inputs) => inputs,
        Err(e) => panic!("bench inputs rejected: {e}"),
    };
    let config = DrishtiConfig::default();

    let mut group = c.benchmark_group("chart_context");
    group.bench_function("new", |b| {
        b.iter(|| ChartContext::new(black_box(&inputs), black_box(&config)))
    });
    group.finish();
}

fn activation_bench(c: &mut Criterion) {
    let ctx = sample_context();
    let cfg = ActivationConfig::default();
    let query = DashaQuery::new(Graha::Guru, Graha::Shani, Graha::Buddh);

    let mut group = c.benchmark_group("activation");
    group.bench_function("house_activations", |b| {
        b.iter(|| house_activations(&ctx, black_box(Graha::Guru), &cfg))
    });
    group.bench_function("compose_dasha", |b| {
        b.iter(|| compose_dasha(&ctx, black_box(&query), &cfg))
    });
    group.finish();
}

criterion_group!(
    benches,
    placement_bench,
    bhava_bench,
    context_bench,
    activation_bench
);
criterion_main!(benches);
