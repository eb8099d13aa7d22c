// Daily case/death records for a selected county or state
use super::count::deserialize_count;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// One day of a region's time series, as returned in the feature service's
/// `attributes` bag. `new_deaths` is filled in client-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CasesByTimeFeature {
    #[serde(rename = "dt")]
    pub date_ms: i64,
    #[serde(rename = "Confirmed", default, deserialize_with = "deserialize_count")]
    pub confirmed: i64,
    #[serde(rename = "Deaths", default, deserialize_with = "deserialize_count")]
    pub deaths: i64,
    #[serde(rename = "NewCases", default, deserialize_with = "deserialize_count")]
    pub new_cases: i64,
    #[serde(rename = "Population", default, deserialize_with = "deserialize_count")]
    pub population: i64,
    #[serde(rename = "NewDeaths", default, deserialize_with = "deserialize_count")]
    pub new_deaths: i64,
}

impl CasesByTimeFeature {
    #[cfg(test)]
    pub fn new(date_ms: i64, confirmed: i64, deaths: i64, new_cases: i64, population: i64) -> Self {
        Self {
            date_ms,
            confirmed,
            deaths,
            new_cases,
            population,
            new_deaths: 0,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.date_ms).map(|dt| dt.date_naive())
    }
}

/// Order records by date and fill in `new_deaths` as the forward difference of
/// cumulative deaths. The first record always gets zero.
pub fn derive_new_deaths(features: &mut [CasesByTimeFeature]) {
    features.sort_by_key(|f| f.date_ms);

    let mut previous_deaths: Option<i64> = None;
    for feature in features.iter_mut() {
        feature.new_deaths = match previous_deaths {
            Some(previous) => feature.deaths - previous,
            None => 0,
        };
        previous_deaths = Some(feature.deaths);
    }
}

/// Numbers shown in the summary panel: the most recent day of the series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub date: Option<NaiveDate>,
    pub confirmed: i64,
    pub deaths: i64,
    pub new_cases: i64,
    pub new_deaths: i64,
    pub population: i64,
}

impl SeriesSummary {
    pub fn from_features(features: &[CasesByTimeFeature]) -> Option<Self> {
        let latest = features.last()?;
        Some(Self {
            date: latest.date(),
            confirmed: latest.confirmed,
            deaths: latest.deaths,
            new_cases: latest.new_cases,
            new_deaths: latest.new_deaths,
            population: latest.population,
        })
    }
}
