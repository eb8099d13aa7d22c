// Precomputed trend datasets for the county and state map layers
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which metric the map layers draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendData {
    Confirmed,
    Death,
    #[default]
    NewCases,
}

impl TrendData {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendData::Confirmed => "confirmed",
            TrendData::Death => "death",
            TrendData::NewCases => "new-cases",
        }
    }
}

impl fmt::Display for TrendData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendData {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(TrendData::Confirmed),
            "death" => Ok(TrendData::Death),
            "new-cases" => Ok(TrendData::NewCases),
            other => Err(format!("unknown trend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendMetrics {
    pub confirmed: Vec<f64>,
    pub deaths: Vec<f64>,
    pub new_cases: Vec<f64>,
    pub new_cases_normalized: Vec<f64>,
}

impl TrendMetrics {
    /// Values for the given trend. New cases prefer the per-100k series when
    /// the dataset carries it.
    pub fn values(&self, trend: TrendData) -> &[f64] {
        match trend {
            TrendData::Confirmed => &self.confirmed,
            TrendData::Death => &self.deaths,
            TrendData::NewCases if !self.new_cases_normalized.is_empty() => {
                &self.new_cases_normalized
            }
            TrendData::NewCases => &self.new_cases,
        }
    }
}

/// Shared view over county and state records
pub trait TrendRecord {
    fn region_id(&self) -> &str;
    fn metrics(&self) -> &TrendMetrics;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyTrendData {
    #[serde(rename = "FIPS")]
    pub fips: String,
    #[serde(flatten)]
    pub metrics: TrendMetrics,
}

impl TrendRecord for CountyTrendData {
    fn region_id(&self) -> &str {
        &self.fips
    }

    fn metrics(&self) -> &TrendMetrics {
        &self.metrics
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTrendData {
    #[serde(rename = "STATE_NAME")]
    pub state_name: String,
    #[serde(flatten)]
    pub metrics: TrendMetrics,
}

impl TrendRecord for StateTrendData {
    fn region_id(&self) -> &str {
        &self.state_name
    }

    fn metrics(&self) -> &TrendMetrics {
        &self.metrics
    }
}

/// One region's trend line as drawn by a map layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerFeature {
    pub id: String,
    pub trend: TrendData,
    pub values: Vec<f64>,
}

pub fn project_layer<R: TrendRecord>(records: &[R], trend: TrendData) -> Vec<LayerFeature> {
    records
        .iter()
        .map(|r| LayerFeature {
            id: r.region_id().to_string(),
            trend,
            values: r.metrics().values(trend).to_vec(),
        })
        .collect()
}
