// Latest-numbers snapshot used for hover tooltips
use super::count::deserialize_count;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSnapshot {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub confirmed: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub deaths: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub weekly_new_cases: i64,
}

/// FIPS code to snapshot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LatestNumbers(HashMap<String, LatestSnapshot>);

impl From<HashMap<String, LatestSnapshot>> for LatestNumbers {
    fn from(entries: HashMap<String, LatestSnapshot>) -> Self {
        Self(entries)
    }
}

impl LatestNumbers {
    pub fn get(&self, fips: &str) -> Option<&LatestSnapshot> {
        self.0.get(fips)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
