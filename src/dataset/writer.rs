//! Writes datasets to CSV through polars.

use crate::dataset::error::DatasetError;
use crate::types::dataset::{CombinedDataset, SiteDataset};
use crate::types::weather_field::WeatherField;
use crate::types::weather_record::WeatherRecord;
use chrono::NaiveDate;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;

/// Columns written before the weather fields, in order.
pub const LEADING_COLUMNS: [&str; 8] = [
    "site_code",
    "points",
    "latitude",
    "longitude",
    "date",
    "year",
    "month",
    "day",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// File name of a site's export, e.g. `OKC_daily_weather_2020-2023.csv`.
pub fn site_file_name(site_code: &str, (min_year, max_year): (i32, i32)) -> String {
    format!("{site_code}_daily_weather_{min_year}-{max_year}.csv")
}

/// File name of the combined export, e.g. `all_sites_daily_weather_2020-2023.csv`.
pub fn combined_file_name((min_year, max_year): (i32, i32)) -> String {
    format!("all_sites_daily_weather_{min_year}-{max_year}.csv")
}

/// Header of every exported file.
pub fn csv_header() -> Vec<&'static str> {
    LEADING_COLUMNS
        .into_iter()
        .chain(WeatherField::ALL.into_iter().map(|f| f.column_name()))
        .collect()
}

/// Writes CSV files into one output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_directory: PathBuf,
    year_span: (i32, i32),
}

impl CsvExporter {
    pub fn new(output_directory: impl Into<PathBuf>, year_span: (i32, i32)) -> Self {
        Self {
            output_directory: output_directory.into(),
            year_span,
        }
    }

    /// Creates the output directory and its parents if missing.
    pub async fn ensure_output_directory(&self) -> Result<(), DatasetError> {
        tokio::fs::create_dir_all(&self.output_directory)
            .await
            .map_err(|e| DatasetError::OutputDirCreation(self.output_directory.clone(), e))
    }

    pub fn site_path(&self, site_code: &str) -> PathBuf {
        self.output_directory
            .join(site_file_name(site_code, self.year_span))
    }

    pub fn combined_path(&self) -> PathBuf {
        self.output_directory.join(combined_file_name(self.year_span))
    }

    pub async fn write_site(&self, dataset: &SiteDataset) -> Result<PathBuf, DatasetError> {
        let path = self.site_path(&dataset.site_code);
        write_records(dataset.records(), &path).await?;
        info!("Saved {} records to {}", dataset.len(), path.display());
        Ok(path)
    }

    pub async fn write_combined(&self, dataset: &CombinedDataset) -> Result<PathBuf, DatasetError> {
        let path = self.combined_path();
        write_records(dataset.records(), &path).await?;
        info!(
            "Saved combined dataset with {} records to {}",
            dataset.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Builds a DataFrame with one row per record and the export column layout.
pub fn records_to_dataframe(records: &[WeatherRecord]) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        Column::new(
            "site_code".into(),
            records.iter().map(|r| r.site_code.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "points".into(),
            records.iter().map(|r| r.points.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "latitude".into(),
            records.iter().map(|r| r.latitude).collect::<Vec<f64>>(),
        ),
        Column::new(
            "longitude".into(),
            records.iter().map(|r| r.longitude).collect::<Vec<f64>>(),
        ),
        Column::new(
            "date".into(),
            records.iter().map(|r| r.date).collect::<Vec<NaiveDate>>(),
        ),
        Column::new(
            "year".into(),
            records.iter().map(|r| r.year()).collect::<Vec<i32>>(),
        ),
        Column::new(
            "month".into(),
            records.iter().map(|r| r.month() as i32).collect::<Vec<i32>>(),
        ),
        Column::new(
            "day".into(),
            records.iter().map(|r| r.day() as i32).collect::<Vec<i32>>(),
        ),
    ];

    for field in WeatherField::ALL {
        columns.push(Column::new(
            field.column_name().into(),
            records.iter().map(|r| r.field(field)).collect::<Vec<Option<f64>>>(),
        ));
    }

    DataFrame::new(columns)
}

async fn write_records(records: &[WeatherRecord], path: &Path) -> Result<(), DatasetError> {
    let path_buf = path.to_path_buf();
    let mut df = records_to_dataframe(records)
        .map_err(|e| DatasetError::DataFrameBuild(path_buf.clone(), e))?;

    task::spawn_blocking(move || {
        let mut file = std::fs::File::create(&path_buf)
            .map_err(|e| DatasetError::CsvWriteIo(path_buf.clone(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_date_format(Some(DATE_FORMAT.to_string()))
            .finish(&mut df)
            .map_err(|e| DatasetError::CsvWritePolars(path_buf, e))?;
        Ok::<(), DatasetError>(())
    })
    .await??;
    Ok(())
}
