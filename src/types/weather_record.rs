use crate::types::site::SiteConfig;
use crate::types::weather_field::WeatherField;
use chrono::{Datelike, NaiveDate};

/// One day of weather at one site.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub site_code: String,
    pub points: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub air_temp_c: Option<f64>,             // T2M
    pub air_temp_max_c: Option<f64>,         // T2M_MAX
    pub dewpoint_temp_c: Option<f64>,        // T2MDEW
    pub solar_radiation_kwh_m2: Option<f64>, // ALLSKY_SFC_SW_DWN
    pub wind_speed_ms: Option<f64>,          // WS2M
    pub wind_speed_max_ms: Option<f64>,      // WS2M_MAX
    pub wind_direction_deg: Option<f64>,     // WD2M
    pub wind_direction_max_deg: Option<f64>, // WD2M_MAX
    pub cloud_cover_pct: Option<f64>,        // CLOUD_AMT_DAY
    pub precipitation_mm: Option<f64>,       // PRECTOTCORR
}

impl WeatherRecord {
    /// A record for `site` on `date` with every weather field null.
    pub fn new(site: &SiteConfig, date: NaiveDate) -> Self {
        Self {
            site_code: site.code.clone(),
            points: site.points.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            date,
            air_temp_c: None,
            air_temp_max_c: None,
            dewpoint_temp_c: None,
            solar_radiation_kwh_m2: None,
            wind_speed_ms: None,
            wind_speed_max_ms: None,
            wind_direction_deg: None,
            wind_direction_max_deg: None,
            cloud_cover_pct: None,
            precipitation_mm: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn field(&self, field: WeatherField) -> Option<f64> {
        match field {
            WeatherField::AirTemp => self.air_temp_c,
            WeatherField::AirTempMax => self.air_temp_max_c,
            WeatherField::Dewpoint => self.dewpoint_temp_c,
            WeatherField::SolarRadiation => self.solar_radiation_kwh_m2,
            WeatherField::WindSpeed => self.wind_speed_ms,
            WeatherField::WindSpeedMax => self.wind_speed_max_ms,
            WeatherField::WindDirection => self.wind_direction_deg,
            WeatherField::WindDirectionMax => self.wind_direction_max_deg,
            WeatherField::CloudCover => self.cloud_cover_pct,
            WeatherField::Precipitation => self.precipitation_mm,
        }
    }

    pub fn set_field(&mut self, field: WeatherField, value: Option<f64>) {
        let slot = match field {
            WeatherField::AirTemp => &mut self.air_temp_c,
            WeatherField::AirTempMax => &mut self.air_temp_max_c,
            WeatherField::Dewpoint => &mut self.dewpoint_temp_c,
            WeatherField::SolarRadiation => &mut self.solar_radiation_kwh_m2,
            WeatherField::WindSpeed => &mut self.wind_speed_ms,
            WeatherField::WindSpeedMax => &mut self.wind_speed_max_ms,
            WeatherField::WindDirection => &mut self.wind_direction_deg,
            WeatherField::WindDirectionMax => &mut self.wind_direction_max_deg,
            WeatherField::CloudCover => &mut self.cloud_cover_pct,
            WeatherField::Precipitation => &mut self.precipitation_mm,
        };
        *slot = value;
    }
}
