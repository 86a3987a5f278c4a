//! Fetches and normalizes every configured year for a site, and every site for
//! the combined dataset. Requests are issued strictly one after another.

use crate::config::settings::ApiSettings;
use crate::dataset::pacing::{FixedDelay, Pacing};
use crate::normalize::normalize;
use crate::power_api::client::WeatherSource;
use crate::power_api::request::FetchRequest;
use crate::types::dataset::{CombinedDataset, SiteDataset};
use crate::types::site::SiteConfig;
use log::{error, info, warn};

pub struct DatasetAssembler<S, P = FixedDelay> {
    source: S,
    pacing: P,
    api: ApiSettings,
    years: Vec<i32>,
}

impl<S: WeatherSource, P: Pacing> DatasetAssembler<S, P> {
    pub fn new(source: S, pacing: P, api: ApiSettings, years: Vec<i32>) -> Self {
        Self {
            source,
            pacing,
            api,
            years,
        }
    }

    /// Fetches every configured year for `site` and returns the records sorted by date.
    ///
    /// A year whose fetch fails is logged and left out; no placeholder rows are
    /// produced for it. If every year fails the dataset is empty.
    pub async fn assemble_site(&self, site: &SiteConfig) -> SiteDataset {
        let mut records = Vec::new();

        for &year in &self.years {
            let delay = self.pacing.delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let request = FetchRequest::new(site, year, &self.api);
            let response = match self.source.fetch(&request).await {
                Ok(response) => response,
                Err(e) => {
                    error!(
                        "Error fetching data for {} {}: {}",
                        site.code,
                        year,
                        error_chain(&e)
                    );
                    warn!("Skipping {} {} due to fetch error", site.code, year);
                    continue;
                }
            };

            records.extend(normalize(&response, site));
        }

        let dataset = SiteDataset::from_records(site.code.clone(), records);
        if dataset.is_empty() {
            warn!("No data collected for site {}", site.code);
        } else {
            info!(
                "Processed {} records for site {}",
                dataset.len(),
                site.code
            );
        }
        dataset
    }

    /// Assembles every site again and concatenates the non-empty results,
    /// sorted by site code and date.
    pub async fn assemble_combined(&self, sites: &[SiteConfig]) -> CombinedDataset {
        let mut datasets = Vec::with_capacity(sites.len());
        for site in sites {
            let dataset = self.assemble_site(site).await;
            if !dataset.is_empty() {
                datasets.push(dataset);
            }
        }
        CombinedDataset::from_sites(datasets)
    }
}

/// Renders an error and all of its sources on one line.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
