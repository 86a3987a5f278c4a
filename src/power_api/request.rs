//! Builds the query for one (site, year) against the daily point endpoint.

use crate::config::settings::ApiSettings;
use crate::types::site::SiteConfig;
use reqwest::Url;

/// Everything needed to request one year of daily data for one site.
///
/// # Examples
///
/// ```
/// use power_fetch::{ApiSettings, FetchRequest, SiteConfig};
///
/// let api = ApiSettings {
///     parameters: vec!["T2M".into(), "PRECTOTCORR".into()],
///     community: "AG".into(),
///     base_url: "https://power.larc.nasa.gov/api/temporal/daily/point".into(),
/// };
/// let site = SiteConfig::new("OKC", 35.5, -97.5, "P1");
/// let request = FetchRequest::new(&site, 2020, &api);
///
/// assert_eq!(request.start(), "20200101");
/// assert_eq!(request.end(), "20201231");
/// assert_eq!(
///     request.url(&api.base_url).unwrap().as_str(),
///     "https://power.larc.nasa.gov/api/temporal/daily/point\
///      ?parameters=T2M%2CPRECTOTCORR&community=AG&longitude=-97.5&latitude=35.5\
///      &start=20200101&end=20201231&format=json"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub site_code: String,
    pub year: i32,
    pub parameters: Vec<String>,
    pub community: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl FetchRequest {
    pub fn new(site: &SiteConfig, year: i32, api: &ApiSettings) -> Self {
        Self {
            site_code: site.code.clone(),
            year,
            parameters: api.parameters.clone(),
            community: api.community.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
        }
    }

    pub fn start(&self) -> String {
        format!("{:04}0101", self.year)
    }

    pub fn end(&self) -> String {
        format!("{:04}1231", self.year)
    }

    /// Query parameters in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("parameters", self.parameters.join(",")),
            ("community", self.community.clone()),
            ("longitude", self.longitude.to_string()),
            ("latitude", self.latitude.to_string()),
            ("start", self.start()),
            ("end", self.end()),
            ("format", "json".to_string()),
        ]
    }

    pub fn url(&self, base_url: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(base_url, self.query_pairs())
    }
}
