use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use event_weather::{
    render_chart, resample, AnchorPolicy, ChartMode, ChartSize, ChartSpec, ForecastField,
    HourlyPoint, RawFieldSeries, RawFieldValue,
};

fn raw_fields() -> Vec<RawFieldSeries> {
    let start = Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap();
    ForecastField::ALL
        .iter()
        .map(|field| {
            let values = (0..72)
                .step_by(3)
                .map(|h| RawFieldValue {
                    valid_start: start + TimeDelta::hours(h),
                    valid_duration: if h % 2 == 0 { "PT3H" } else { "PT2H" }.to_string(),
                    value: Some(10.0 + (h % 17) as f64),
                })
                .collect();
            RawFieldSeries::new(*field, values)
        })
        .collect()
}

fn bench_resample_and_render(c: &mut Criterion) {
    let fields = raw_fields();
    let now = Utc.with_ymd_and_hms(2026, 2, 8, 9, 42, 0).unwrap();
    c.bench_function("resample", |b| {
        b.iter(|| resample(black_box(&fields), now, AnchorPolicy::NextHour))
    });

    let hours = resample(&fields, now, AnchorPolicy::NextHour);
    let kickoff = Utc.with_ymd_and_hms(2026, 2, 8, 23, 30, 0).unwrap();
    let spec = ChartSpec::builder()
        .values(HourlyPoint::series(&hours, ForecastField::Temperature))
        .color("#2196f3")
        .mode(ChartMode::Natural)
        .threshold(80.0)
        .hours(&hours)
        .event_time(kickoff)
        .build();
    c.bench_function("render_chart", |b| {
        b.iter(|| render_chart(black_box(&spec), ChartSize::default()))
    });
}

criterion_group!(benches, bench_resample_and_render);
criterion_main!(benches);
