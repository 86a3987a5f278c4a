mod config;
mod dataset;
mod error;
mod fetcher;
mod logging;
mod normalize;
mod power_api;
mod types;

pub use error::PowerFetchError;
pub use fetcher::*;

pub use config::error::ConfigError;
pub use config::settings::*;

pub use power_api::client::*;
pub use power_api::error::{FetchError, ShapeError};
pub use power_api::request::FetchRequest;
pub use power_api::response::{DailySeries, RawResponse};

pub use normalize::{normalize, parse_date_key, MISSING_VALUE};

pub use dataset::assembler::DatasetAssembler;
pub use dataset::error::DatasetError;
pub use dataset::pacing::*;
pub use dataset::writer::*;

pub use types::dataset::{CombinedDataset, SiteDataset};
pub use types::site::SiteConfig;
pub use types::weather_field::WeatherField;
pub use types::weather_record::WeatherRecord;

pub use logging::{init_logging, DEFAULT_LOG_FILE};
