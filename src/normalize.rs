//! Flattens a daily point payload into one [`WeatherRecord`] per date.

use crate::power_api::response::{DailySeries, RawResponse};
use crate::types::site::SiteConfig;
use crate::types::weather_field::WeatherField;
use crate::types::weather_record::WeatherRecord;
use chrono::NaiveDate;
use log::warn;
use std::collections::BTreeSet;

/// The value NASA POWER reports for a missing observation.
pub const MISSING_VALUE: f64 = -999.0;

/// Converts a response into records for `site`.
///
/// Dates are the union of every parameter's date keys, so a parameter with a
/// sparser series never shrinks the output. A field is `None` when its
/// parameter was not returned, has no entry for the date, or holds
/// [`MISSING_VALUE`]. Any other value is copied unchanged.
///
/// The returned records are in no particular order.
pub fn normalize(response: &RawResponse, site: &SiteConfig) -> Vec<WeatherRecord> {
    if response.parameters.is_empty() {
        warn!(
            "Response for site {} contains no parameters, no records produced",
            site.code
        );
        return Vec::new();
    }

    let dates = date_keys(response, &site.code);
    let series: Vec<(WeatherField, Option<&DailySeries>)> = WeatherField::ALL
        .into_iter()
        .map(|field| (field, response.parameters.get(field.parameter_code())))
        .collect();

    dates
        .into_iter()
        .filter_map(|key| {
            let Some(date) = parse_date_key(key) else {
                warn!("Skipping invalid date key '{}' for site {}", key, site.code);
                return None;
            };
            let mut record = WeatherRecord::new(site, date);
            for (field, values) in &series {
                record.set_field(*field, values.and_then(|v| observed_value(v, key)));
            }
            Some(record)
        })
        .collect()
}

fn date_keys<'a>(response: &'a RawResponse, site_code: &str) -> BTreeSet<&'a str> {
    let union: BTreeSet<&str> = response
        .parameters
        .values()
        .flat_map(|series| series.keys().map(String::as_str))
        .collect();

    let uneven: Vec<&str> = response
        .parameters
        .iter()
        .filter(|(_, series)| series.len() != union.len())
        .map(|(code, _)| code.as_str())
        .collect();
    if !uneven.is_empty() {
        warn!(
            "Parameters {:?} for site {} do not cover all {} dates, their gaps are exported as null",
            uneven,
            site_code,
            union.len()
        );
    }
    union
}

fn observed_value(series: &DailySeries, key: &str) -> Option<f64> {
    series
        .get(key)
        .copied()
        .flatten()
        .filter(|value| *value != MISSING_VALUE)
}

/// Parses a `YYYYMMDD` key by fixed-width slicing.
///
/// # Examples
///
/// ```
/// use power_fetch::parse_date_key;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date_key("20200229"), NaiveDate::from_ymd_opt(2020, 2, 29));
/// assert_eq!(parse_date_key("20210229"), None);
/// assert_eq!(parse_date_key("2021-01-01"), None);
/// ```
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    if key.len() != 8 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = key[0..4].parse().ok()?;
    let month = key[4..6].parse().ok()?;
    let day = key[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::new("A", 35.5, -97.5, "P1")
    }

    fn response(json: &str) -> RawResponse {
        RawResponse::from_slice(json.as_bytes()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sorted(mut records: Vec<WeatherRecord>) -> Vec<WeatherRecord> {
        records.sort_by_key(|r| r.date);
        records
    }

    #[test]
    fn sentinel_becomes_null_and_other_fields_stay_null() {
        let raw = response(
            r#"{"properties":{"parameter":{"T2M":{"20200101": 15.2, "20200102": -999}}}}"#,
        );
        let records = sorted(normalize(&raw, &site()));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date(2020, 1, 1));
        assert_eq!(records[0].air_temp_c, Some(15.2));
        assert_eq!(records[1].date, date(2020, 1, 2));
        assert_eq!(records[1].air_temp_c, None);

        for record in &records {
            assert_eq!(record.site_code, "A");
            assert_eq!(record.points, "P1");
            assert_eq!(record.latitude, 35.5);
            assert_eq!(record.longitude, -97.5);
            for field in WeatherField::ALL
                .into_iter()
                .filter(|f| *f != WeatherField::AirTemp)
            {
                assert_eq!(record.field(field), None, "{field}");
            }
        }
    }

    #[test]
    fn values_are_copied_unchanged() {
        let raw = response(
            r#"{"properties":{"parameter":{
                "T2M_MAX": {"20200301": 0.0},
                "ALLSKY_SFC_SW_DWN": {"20200301": 5.123456789},
                "WD2M": {"20200301": 359.99},
                "PRECTOTCORR": {"20200301": -998.99},
                "CLOUD_AMT_DAY": {"20200301": 100}
            }}}"#,
        );
        let records = normalize(&raw, &site());
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.air_temp_max_c, Some(0.0));
        assert_eq!(record.solar_radiation_kwh_m2, Some(5.123456789));
        assert_eq!(record.wind_direction_deg, Some(359.99));
        assert_eq!(record.precipitation_mm, Some(-998.99));
        assert_eq!(record.cloud_cover_pct, Some(100.0));
        assert_eq!(record.air_temp_c, None);
    }

    #[test]
    fn each_parameter_maps_to_its_column() {
        let raw = response(
            r#"{"properties":{"parameter":{
                "T2M": {"20200101": 1},
                "T2M_MAX": {"20200101": 2},
                "T2MDEW": {"20200101": 3},
                "ALLSKY_SFC_SW_DWN": {"20200101": 4},
                "WS2M": {"20200101": 5},
                "WS2M_MAX": {"20200101": 6},
                "WD2M": {"20200101": 7},
                "WD2M_MAX": {"20200101": 8},
                "CLOUD_AMT_DAY": {"20200101": 9},
                "PRECTOTCORR": {"20200101": 10},
                "RH2M": {"20200101": 11}
            }}}"#,
        );
        let records = normalize(&raw, &site());
        let record = &records[0];
        assert_eq!(record.air_temp_c, Some(1.0));
        assert_eq!(record.air_temp_max_c, Some(2.0));
        assert_eq!(record.dewpoint_temp_c, Some(3.0));
        assert_eq!(record.solar_radiation_kwh_m2, Some(4.0));
        assert_eq!(record.wind_speed_ms, Some(5.0));
        assert_eq!(record.wind_speed_max_ms, Some(6.0));
        assert_eq!(record.wind_direction_deg, Some(7.0));
        assert_eq!(record.wind_direction_max_deg, Some(8.0));
        assert_eq!(record.cloud_cover_pct, Some(9.0));
        assert_eq!(record.precipitation_mm, Some(10.0));
    }

    #[test]
    fn dates_are_the_union_of_all_parameters() {
        // T2M iterates first and carries only one of the three dates.
        let raw = response(
            r#"{"properties":{"parameter":{
                "T2M": {"20200102": 2.5},
                "WS2M": {"20200101": 10.0, "20200102": 11.0, "20200103": 12.0}
            }}}"#,
        );
        let records = sorted(normalize(&raw, &site()));
        let dates: Vec<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, [date(2020, 1, 1), date(2020, 1, 2), date(2020, 1, 3)]);
        assert_eq!(records[0].air_temp_c, None);
        assert_eq!(records[1].air_temp_c, Some(2.5));
        assert_eq!(records[2].air_temp_c, None);
        assert_eq!(records[2].wind_speed_ms, Some(12.0));
    }

    #[test]
    fn one_record_per_date() {
        let raw = response(
            r#"{"properties":{"parameter":{
                "T2M": {"20201231": 1.0, "20200101": 2.0},
                "WS2M": {"20201231": 3.0, "20200101": 4.0}
            }}}"#,
        );
        assert_eq!(normalize(&raw, &site()).len(), 2);
    }

    #[test]
    fn empty_parameter_block_yields_no_records() {
        let raw = response(r#"{"properties":{"parameter":{}}}"#);
        assert!(normalize(&raw, &site()).is_empty());
    }

    #[test]
    fn invalid_date_keys_are_skipped() {
        let raw = response(
            r#"{"properties":{"parameter":{"T2M":{"20200101": 1.0, "20201301": 2.0, "ANN": 3.0}}}}"#,
        );
        let records = normalize(&raw, &site());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date(2020, 1, 1));
    }

    #[test]
    fn date_components_follow_the_key() {
        let raw = response(r#"{"properties":{"parameter":{"T2M":{"19991207": 1.0}}}}"#);
        let records = normalize(&raw, &site());
        assert_eq!(records[0].year(), 1999);
        assert_eq!(records[0].month(), 12);
        assert_eq!(records[0].day(), 7);
    }
}
