use crate::config::error::ConfigError;
use crate::dataset::error::DatasetError;
use crate::power_api::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowerFetchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
