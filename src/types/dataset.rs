//! Ordered collections of [`WeatherRecord`]s, per site and across sites.

use crate::types::weather_record::WeatherRecord;

/// All records of one site, sorted by date ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteDataset {
    pub site_code: String,
    records: Vec<WeatherRecord>,
}

impl SiteDataset {
    /// Sorts `records` by date. The sort is stable.
    pub fn from_records(site_code: impl Into<String>, mut records: Vec<WeatherRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self {
            site_code: site_code.into(),
            records,
        }
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<WeatherRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Records of every site, sorted by site code and then date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedDataset {
    records: Vec<WeatherRecord>,
}

impl CombinedDataset {
    pub fn from_sites(sites: impl IntoIterator<Item = SiteDataset>) -> Self {
        let mut records: Vec<WeatherRecord> = sites
            .into_iter()
            .flat_map(SiteDataset::into_records)
            .collect();
        records.sort_by(|a, b| a.site_code.cmp(&b.site_code).then(a.date.cmp(&b.date)));
        Self { records }
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
