use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use power_fetch::{normalize, RawResponse, SiteConfig, WeatherField};
use serde_json::{json, Map, Value};

fn year_response() -> RawResponse {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut parameters = Map::new();
    for (i, field) in WeatherField::ALL.into_iter().enumerate() {
        let series: Map<String, Value> = (0..366)
            .map(|day| {
                let date = start + Duration::days(day);
                let value = if day % 17 == 0 { -999.0 } else { (day + i as i64) as f64 * 0.1 };
                (date.format("%Y%m%d").to_string(), json!(value))
            })
            .collect();
        parameters.insert(field.parameter_code().to_string(), Value::Object(series));
    }
    RawResponse::from_value(json!({ "properties": { "parameter": parameters } })).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let response = year_response();
    let site = SiteConfig::new("OKC", 35.47, -97.52, "P1");
    c.bench_function("normalize_full_year", |b| {
        b.iter(|| normalize(black_box(&response), black_box(&site)))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
