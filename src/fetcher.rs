//! The top-level pipeline: summary, per-site export and combined export.

use crate::config::settings::Settings;
use crate::dataset::assembler::DatasetAssembler;
use crate::dataset::pacing::{FixedDelay, Pacing, DEFAULT_REQUEST_DELAY};
use crate::dataset::writer::CsvExporter;
use crate::error::PowerFetchError;
use crate::power_api::client::{PowerClient, WeatherSource, DEFAULT_TIMEOUT};
use bon::bon;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// Which exports a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Per-site files followed by the combined file.
    #[default]
    Full,
    PerSiteOnly,
    CombinedOnly,
}

/// Drives a complete run for one configuration.
///
/// The combined export assembles every site again rather than reusing the
/// per-site results, so a full run issues each request twice.
///
/// # Examples
///
/// ```no_run
/// use power_fetch::{PowerFetcher, RunMode, Settings};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), power_fetch::PowerFetchError> {
/// let settings = Settings::load(Path::new("config.toml"))?;
/// let fetcher = PowerFetcher::builder().settings(settings).build().await?;
/// fetcher.print_config_summary();
/// fetcher.run(RunMode::Full).await?;
/// # Ok(())
/// # }
/// ```
pub struct PowerFetcher<S = PowerClient, P = FixedDelay> {
    settings: Settings,
    assembler: DatasetAssembler<S, P>,
    exporter: CsvExporter,
}

#[bon]
impl PowerFetcher<PowerClient, FixedDelay> {
    /// Creates a fetcher that talks to the endpoint named in `settings`.
    ///
    /// * `.settings(Settings)`: **Required.**
    /// * `.timeout(Duration)`: Optional. Per-request timeout, defaults to 30 seconds.
    /// * `.request_delay(Duration)`: Optional. Wait before each request, defaults to 1 second.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the output directory cannot be created.
    #[builder]
    pub async fn new(
        settings: Settings,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
        #[builder(default = DEFAULT_REQUEST_DELAY)] request_delay: Duration,
    ) -> Result<Self, PowerFetchError> {
        let client = PowerClient::builder()
            .base_url(settings.api.base_url.clone())
            .timeout(timeout)
            .build()?;
        Self::with_source(settings, client, FixedDelay(request_delay)).await
    }
}

impl<S: WeatherSource, P: Pacing> PowerFetcher<S, P> {
    /// Creates a fetcher around any [`WeatherSource`] and pacing policy.
    pub async fn with_source(
        settings: Settings,
        source: S,
        pacing: P,
    ) -> Result<Self, PowerFetchError> {
        let exporter = CsvExporter::new(settings.output_directory.clone(), settings.year_span());
        exporter.ensure_output_directory().await?;
        let assembler = DatasetAssembler::new(
            source,
            pacing,
            settings.api.clone(),
            settings.years.clone(),
        );
        Ok(Self {
            settings,
            assembler,
            exporter,
        })
    }

    pub fn print_config_summary(&self) {
        let settings = &self.settings;
        let codes: Vec<&str> = settings.sites.iter().map(|s| s.code.as_str()).collect();
        info!("Configuration Summary:");
        info!("  Sites: {}", codes.join(", "));
        if let (Some(first), Some(last)) = (settings.years.first(), settings.years.last()) {
            info!(
                "  Years: {} to {} ({} years)",
                first,
                last,
                settings.years.len()
            );
        }
        info!(
            "  Parameters: {} weather variables",
            settings.api.parameters.len()
        );
        info!(
            "  Output directory: {}",
            settings.output_directory.display()
        );
        for site in &settings.sites {
            info!("  {}: {}, {}", site.code, site.latitude, site.longitude);
        }
    }

    /// Assembles and writes one file per site. Sites without data get no file.
    ///
    /// Returns the paths written, in site order.
    pub async fn fetch_all_data(&self) -> Result<Vec<PathBuf>, PowerFetchError> {
        info!("Starting data collection process");
        let mut written = Vec::new();

        for site in &self.settings.sites {
            info!("Processing site: {}", site.code);
            let dataset = self.assembler.assemble_site(site).await;
            if dataset.is_empty() {
                warn!("No data to save for site {}", site.code);
                continue;
            }
            written.push(self.exporter.write_site(&dataset).await?);
        }

        info!("Data collection complete!");
        Ok(written)
    }

    /// Assembles every site and writes the combined file, unless no site produced data.
    pub async fn create_combined_file(&self) -> Result<Option<PathBuf>, PowerFetchError> {
        info!("Creating combined dataset");
        let combined = self.assembler.assemble_combined(&self.settings.sites).await;
        if combined.is_empty() {
            warn!("No data available to create combined file");
            return Ok(None);
        }
        Ok(Some(self.exporter.write_combined(&combined).await?))
    }

    pub async fn run(&self, mode: RunMode) -> Result<(), PowerFetchError> {
        if mode != RunMode::CombinedOnly {
            self.fetch_all_data().await?;
        }
        if mode != RunMode::PerSiteOnly {
            self.create_combined_file().await?;
        }
        info!("All operations completed successfully!");
        Ok(())
    }
}
