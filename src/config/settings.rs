//! Typed run configuration, loaded from a TOML document and validated up front
//! so that no lookup can fail once fetching has started.

use crate::config::error::ConfigError;
use crate::types::site::SiteConfig;
use log::info;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "nasa_power_data";
pub const DEFAULT_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// Settings forwarded to the NASA POWER API with every request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSettings {
    /// Parameter codes to request, e.g. `T2M`, `PRECTOTCORR`.
    pub parameters: Vec<String>,
    /// User community code, e.g. `AG`, `RE` or `SB`.
    pub community: String,
    /// Endpoint override. Defaults to [`DEFAULT_BASE_URL`].
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// A validated run configuration.
///
/// # Examples
///
/// ```
/// use power_fetch::Settings;
///
/// let settings = Settings::from_toml_str(r#"
///     sites = ["OKC"]
///     years = [2021, 2020]
///
///     [api_settings]
///     parameters = ["T2M", "PRECTOTCORR"]
///     community = "AG"
///
///     [OKC]
///     lat = 35.47
///     long = -97.52
///     POINTS = 1
/// "#).unwrap();
///
/// assert_eq!(settings.sites[0].points, "1");
/// assert_eq!(settings.year_span(), (2020, 2021));
/// assert_eq!(settings.output_directory.to_str(), Some("nasa_power_data"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Sites in configured order.
    pub sites: Vec<SiteConfig>,
    /// Years in configured order.
    pub years: Vec<i32>,
    pub api: ApiSettings,
    pub output_directory: PathBuf,
}

// Shape of the document on disk. Per-site tables live at the top level, keyed by site code.
// Other top-level keys are kept untyped and only listed sites are decoded.
#[derive(Debug, Deserialize)]
struct RawSettings {
    sites: Vec<String>,
    years: Vec<i32>,
    api_settings: ApiSettings,
    output_directory: Option<PathBuf>,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct SiteEntry {
    lat: f64,
    long: f64,
    #[serde(rename = "POINTS")]
    points: Label,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Integer(i64),
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        match label {
            Label::Text(text) => text,
            Label::Integer(number) => number.to_string(),
        }
    }
}

impl Settings {
    /// Reads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Read(path.to_path_buf(), e),
        })?;
        let settings = Self::from_toml_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(text)?;
        Self::validate(raw)
    }

    fn validate(mut raw: RawSettings) -> Result<Self, ConfigError> {
        if raw.sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        if raw.years.is_empty() {
            return Err(ConfigError::NoYears);
        }
        if raw.api_settings.parameters.is_empty() {
            return Err(ConfigError::NoParameters);
        }

        let mut seen_years = HashSet::new();
        for &year in &raw.years {
            if !(1000..=9999).contains(&year) {
                return Err(ConfigError::InvalidYear(year));
            }
            if !seen_years.insert(year) {
                return Err(ConfigError::DuplicateYear(year));
            }
        }

        let mut sites = Vec::with_capacity(raw.sites.len());
        for code in &raw.sites {
            if sites.iter().any(|s: &SiteConfig| &s.code == code) {
                return Err(ConfigError::DuplicateSite(code.clone()));
            }
            let entry: SiteEntry = raw
                .extra
                .remove(code)
                .ok_or_else(|| ConfigError::MissingSiteEntry(code.clone()))?
                .try_into()
                .map_err(|e| ConfigError::InvalidSiteEntry(code.clone(), e))?;
            sites.push(SiteConfig::new(
                code.clone(),
                entry.lat,
                entry.long,
                entry.points,
            ));
        }

        Ok(Settings {
            sites,
            years: raw.years,
            api: raw.api_settings,
            output_directory: raw
                .output_directory
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)),
        })
    }

    /// Smallest and largest configured year, used in output file names.
    pub fn year_span(&self) -> (i32, i32) {
        let min = self.years.iter().copied().min().unwrap_or_default();
        let max = self.years.iter().copied().max().unwrap_or_default();
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        sites = ["B", "A"]
        years = [2020, 2021]
        output_directory = "out"

        [api_settings]
        parameters = ["T2M", "WS2M"]
        community = "AG"

        [A]
        lat = 10.5
        long = -20.25
        POINTS = "alpha"

        [B]
        lat = 1
        long = 2
        POINTS = 7

        [UNUSED]
        lat = 0.0
        long = 0.0
        POINTS = "x"
    "#;

    #[test]
    fn parses_sites_in_configured_order() {
        let settings = Settings::from_toml_str(VALID).unwrap();
        let codes: Vec<_> = settings.sites.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, ["B", "A"]);
        assert_eq!(settings.sites[0].latitude, 1.0);
        assert_eq!(settings.sites[0].points, "7");
        assert_eq!(settings.sites[1], SiteConfig::new("A", 10.5, -20.25, "alpha"));
        assert_eq!(settings.output_directory, PathBuf::from("out"));
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.api.community, "AG");
    }

    #[test]
    fn missing_site_entry_is_reported() {
        let text = VALID.replace(r#"sites = ["B", "A"]"#, r#"sites = ["B", "C"]"#);
        let err = Settings::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSiteEntry(code) if code == "C"));
    }

    #[test]
    fn unlisted_keys_are_ignored() {
        let text = format!(
            r#"description = "Oklahoma sites"
            {VALID}
            [OLD]
            lat = 3.0
        "#
        );
        let settings = Settings::from_toml_str(&text).unwrap();
        assert_eq!(settings.sites.len(), 2);
    }

    #[test]
    fn incomplete_listed_site_entry_is_reported() {
        let text = VALID.replace(r#"POINTS = "alpha""#, "");
        let err = Settings::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSiteEntry(code, _) if code == "A"));
    }

    #[test]
    fn missing_api_settings_is_a_parse_error() {
        let text = r#"
            sites = ["A"]
            years = [2020]

            [A]
            lat = 1.0
            long = 1.0
            POINTS = "p"
        "#;
        assert!(matches!(
            Settings::from_toml_str(text),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_bad_years() {
        let three_digits = VALID.replace("years = [2020, 2021]", "years = [999]");
        assert!(matches!(
            Settings::from_toml_str(&three_digits),
            Err(ConfigError::InvalidYear(999))
        ));

        let repeated = VALID.replace("years = [2020, 2021]", "years = [2020, 2020]");
        assert!(matches!(
            Settings::from_toml_str(&repeated),
            Err(ConfigError::DuplicateYear(2020))
        ));

        let none = VALID.replace("years = [2020, 2021]", "years = []");
        assert!(matches!(
            Settings::from_toml_str(&none),
            Err(ConfigError::NoYears)
        ));
    }

    #[test]
    fn rejects_empty_parameter_list() {
        let text = VALID.replace(r#"parameters = ["T2M", "WS2M"]"#, "parameters = []");
        assert!(matches!(
            Settings::from_toml_str(&text),
            Err(ConfigError::NoParameters)
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn year_span_ignores_order() {
        let text = VALID.replace("years = [2020, 2021]", "years = [2019, 2023, 2001]");
        let settings = Settings::from_toml_str(&text).unwrap();
        assert_eq!(settings.year_span(), (2001, 2023));
    }
}
