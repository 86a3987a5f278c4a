//! A configured site: a named point for which daily weather history is fetched.

/// A geographic point identified by a site code.
///
/// Built once from the configuration and shared read-only for the whole run.
///
/// # Examples
///
/// ```
/// use power_fetch::SiteConfig;
///
/// let site = SiteConfig::new("OKC", 35.47, -97.52, "P1");
/// assert_eq!(site.code, "OKC");
/// assert_eq!(site.longitude, -97.52);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// The site code, used in file names and in the `site_code` column.
    pub code: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Auxiliary label exported in the `points` column.
    pub points: String,
}

impl SiteConfig {
    pub fn new(
        code: impl Into<String>,
        latitude: f64,
        longitude: f64,
        points: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            latitude,
            longitude,
            points: points.into(),
        }
    }
}
