//! HTTP access to the NASA POWER daily point endpoint.

use crate::config::settings::DEFAULT_BASE_URL;
use crate::power_api::error::FetchError;
use crate::power_api::request::FetchRequest;
use crate::power_api::response::RawResponse;
use bon::bon;
use log::{debug, info};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A source of daily point payloads.
///
/// [`PowerClient`] is the production implementation. The assembler only
/// depends on this trait, so tests can drive it with scripted responses.
pub trait WeatherSource {
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<RawResponse, FetchError>> + Send;
}

/// Client for the NASA POWER API.
///
/// Owns one connection-pooling `reqwest::Client` for its whole lifetime; every
/// request of a run goes through it and it is released when the `PowerClient`
/// is dropped.
///
/// # Examples
///
/// ```
/// use power_fetch::PowerClient;
/// use std::time::Duration;
///
/// # fn run() -> Result<(), power_fetch::FetchError> {
/// let client = PowerClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// assert_eq!(client.base_url(), "https://power.larc.nasa.gov/api/temporal/daily/point");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PowerClient {
    http: Client,
    base_url: String,
}

#[bon]
impl PowerClient {
    /// Creates a client.
    ///
    /// * `.base_url(..)`: Optional. Endpoint to query. Defaults to the public daily point endpoint.
    /// * `.timeout(..)`: Optional. Per-request timeout. Defaults to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend cannot be initialised.
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_BASE_URL.to_string())] base_url: String,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl WeatherSource for PowerClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<RawResponse, FetchError> {
        let url = request
            .url(&self.base_url)
            .map_err(|source| FetchError::InvalidUrl {
                base_url: self.base_url.clone(),
                source,
            })?;
        let url_string = url.to_string();

        info!(
            "Fetching data for {} ({}): {}, {}",
            request.site_code, request.year, request.latitude, request.longitude
        );
        debug!("GET {}", url_string);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url_string.clone(),
                source: e,
            })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url_string,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::Transport {
                        url: url_string,
                        source: e,
                    }
                });
            }
        };

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url_string.clone(),
            source: e,
        })?;

        let raw = RawResponse::from_slice(&body).map_err(|source| FetchError::InvalidShape {
            url: url_string,
            source,
        })?;

        for message in &raw.messages {
            debug!("API message for {} {}: {}", request.site_code, request.year, message);
        }
        info!(
            "Successfully fetched data for {} {}",
            request.site_code, request.year
        );
        Ok(raw)
    }
}
