use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use solarfield::planetlib::vsop87;
use solarfield::positions::{geocentric_position, solar_system_object};
use solarfield::time::sidereal::apparent_sidereal_time;
use solarfield::{Body, EphemerisSettings, JulianDay, ObserverLocation};

fn bench_heliocentric_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("heliocentric_series");

    for body in Body::SUPPORTED.into_iter().filter(Body::is_planet) {
        group.bench_with_input(BenchmarkId::new("vsop87", body), &body, |b, &body| {
            b.iter(|| vsop87::heliocentric_coordinates(black_box(body), black_box(0.25)));
        });
    }

    group.finish();
}

fn bench_geocentric_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("geocentric_pipeline");
    let settings = EphemerisSettings::default();
    let jd = JulianDay::from_jd(2_460_389.5);

    group.bench_function("mars_light_time", |b| {
        b.iter(|| geocentric_position(black_box(Body::Mars), black_box(&jd), &settings));
    });

    group.bench_function("sidereal_time", |b| {
        b.iter(|| apparent_sidereal_time(black_box(&jd)));
    });

    group.finish();
}

fn bench_full_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("solar_system_object");
    let settings = EphemerisSettings::default();
    let observer = ObserverLocation::new(48.85, -2.35).unwrap();

    group.bench_function("all_bodies_one_night", |b| {
        b.iter(|| {
            for hour in 0..24 {
                let jd = JulianDay::from_jd(2_460_389.5 + hour as f64 / 24.0);
                for body in Body::SUPPORTED {
                    black_box(solar_system_object(body, &jd, &observer, &settings));
                }
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_heliocentric_series,
    bench_geocentric_pipeline,
    bench_full_query
);
criterion_main!(benches);
