// Query parameters for the cases-by-time feature service
use super::selection::Selector;
use serde_json::json;

const COUNTY_OUT_FIELDS: &str = "dt,Confirmed,Deaths,NewCases,Population";
const SUMMED_FIELDS: [&str; 4] = ["Confirmed", "Deaths", "NewCases", "Population"];

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureQuery {
    params: Vec<(&'static str, String)>,
}

impl FeatureQuery {
    /// County rows are read as-is. State rows are summed over their counties
    /// server-side, grouped by state and date.
    pub fn for_selector(selector: &Selector) -> Self {
        let params = match selector {
            Selector::County { fips } => vec![
                ("f", "json".to_string()),
                ("where", format!("FIPS='{}'", escape_literal(fips))),
                ("outFields", COUNTY_OUT_FIELDS.to_string()),
                ("orderByFields", "dt".to_string()),
            ],
            Selector::State { name } => vec![
                ("f", "json".to_string()),
                ("where", format!("ST_Name='{}'", escape_literal(name))),
                ("outFields", "*".to_string()),
                ("orderByFields", "dt".to_string()),
                ("groupByFieldsForStatistics", "ST_Name,dt".to_string()),
                ("outStatistics", sum_statistics()),
            ],
        };

        Self { params }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn sum_statistics() -> String {
    let statistics: Vec<_> = SUMMED_FIELDS
        .iter()
        .map(|field| {
            json!({
                "statisticType": "sum",
                "onStatisticField": field,
                "outStatisticFieldName": field,
            })
        })
        .collect();

    serde_json::Value::Array(statistics).to_string()
}

/// Single quotes are doubled inside SQL string literals.
fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
