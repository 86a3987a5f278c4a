//! The fixed set of weather variables exported per day, and the NASA POWER
//! parameter code each one is read from.

use std::fmt;

/// A named weather column in the exported dataset.
///
/// Each variant is backed by exactly one NASA POWER parameter code. Parameters
/// requested from the API that have no variant here are ignored during
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeatherField {
    /// Air temperature at 2 m (`T2M`), degrees Celsius.
    AirTemp,
    /// Maximum air temperature at 2 m (`T2M_MAX`), degrees Celsius.
    AirTempMax,
    /// Dew/frost point at 2 m (`T2MDEW`), degrees Celsius.
    Dewpoint,
    /// All-sky surface shortwave downward irradiance (`ALLSKY_SFC_SW_DWN`), kWh/m².
    SolarRadiation,
    /// Wind speed at 2 m (`WS2M`), m/s.
    WindSpeed,
    /// Maximum wind speed at 2 m (`WS2M_MAX`), m/s.
    WindSpeedMax,
    /// Wind direction at 2 m (`WD2M`), degrees.
    WindDirection,
    /// Wind direction at the time of maximum wind speed (`WD2M_MAX`), degrees.
    WindDirectionMax,
    /// Daylight cloud amount (`CLOUD_AMT_DAY`), percent.
    CloudCover,
    /// Bias-corrected total precipitation (`PRECTOTCORR`), mm/day.
    Precipitation,
}

impl WeatherField {
    /// All fields, in output column order.
    pub const ALL: [WeatherField; 10] = [
        WeatherField::AirTemp,
        WeatherField::AirTempMax,
        WeatherField::Dewpoint,
        WeatherField::SolarRadiation,
        WeatherField::WindSpeed,
        WeatherField::WindSpeedMax,
        WeatherField::WindDirection,
        WeatherField::WindDirectionMax,
        WeatherField::CloudCover,
        WeatherField::Precipitation,
    ];

    /// The NASA POWER parameter code this field is read from.
    pub fn parameter_code(&self) -> &'static str {
        match self {
            WeatherField::AirTemp => "T2M",
            WeatherField::AirTempMax => "T2M_MAX",
            WeatherField::Dewpoint => "T2MDEW",
            WeatherField::SolarRadiation => "ALLSKY_SFC_SW_DWN",
            WeatherField::WindSpeed => "WS2M",
            WeatherField::WindSpeedMax => "WS2M_MAX",
            WeatherField::WindDirection => "WD2M",
            WeatherField::WindDirectionMax => "WD2M_MAX",
            WeatherField::CloudCover => "CLOUD_AMT_DAY",
            WeatherField::Precipitation => "PRECTOTCORR",
        }
    }

    /// The CSV column name this field is exported under.
    pub fn column_name(&self) -> &'static str {
        match self {
            WeatherField::AirTemp => "air_temp_c",
            WeatherField::AirTempMax => "air_temp_max_c",
            WeatherField::Dewpoint => "dewpoint_temp_c",
            WeatherField::SolarRadiation => "solar_radiation_kwh_m2",
            WeatherField::WindSpeed => "wind_speed_ms",
            WeatherField::WindSpeedMax => "wind_speed_max_ms",
            WeatherField::WindDirection => "wind_direction_deg",
            WeatherField::WindDirectionMax => "wind_direction_max_deg",
            WeatherField::CloudCover => "cloud_cover_pct",
            WeatherField::Precipitation => "precipitation_mm",
        }
    }

    pub fn from_parameter_code(code: &str) -> Option<WeatherField> {
        Self::ALL
            .into_iter()
            .find(|field| field.parameter_code() == code)
    }
}

/// Formats a `WeatherField` using its output column name.
///
/// # Examples
///
/// ```
/// use power_fetch::WeatherField;
///
/// assert_eq!(WeatherField::AirTemp.to_string(), "air_temp_c");
/// assert_eq!(format!("{}", WeatherField::Precipitation), "precipitation_mm");
/// ```
impl fmt::Display for WeatherField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_codes_round_trip() {
        for field in WeatherField::ALL {
            assert_eq!(
                WeatherField::from_parameter_code(field.parameter_code()),
                Some(field)
            );
        }
    }

    #[test]
    fn unmapped_code_is_none() {
        assert_eq!(WeatherField::from_parameter_code("RH2M"), None);
        assert_eq!(WeatherField::from_parameter_code("t2m"), None);
    }
}
