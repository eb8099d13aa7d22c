// Map selections: typed features from the county/state layers and the
// selector used to query their time series
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Identifies exactly one region to query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    County { fips: String },
    State { name: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectorError {
    #[error("either countyFIPS or stateName is required")]
    Missing,

    #[error("countyFIPS and stateName are mutually exclusive")]
    Ambiguous,
}

impl Selector {
    /// Build a selector from the two optional request fields. Blank values
    /// count as absent.
    pub fn from_parts(
        county_fips: Option<&str>,
        state_name: Option<&str>,
    ) -> Result<Self, SelectorError> {
        let county_fips = county_fips.map(str::trim).filter(|s| !s.is_empty());
        let state_name = state_name.map(str::trim).filter(|s| !s.is_empty());

        match (county_fips, state_name) {
            (Some(fips), None) => Ok(Selector::County {
                fips: fips.to_string(),
            }),
            (None, Some(name)) => Ok(Selector::State {
                name: name.to_string(),
            }),
            (Some(_), Some(_)) => Err(SelectorError::Ambiguous),
            (None, None) => Err(SelectorError::Missing),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Selector::County { fips } => fips,
            Selector::State { name } => name,
        }
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            Selector::County { .. } => LocationKind::County,
            Selector::State { .. } => LocationKind::State,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().as_str(), self.identifier())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    County,
    State,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::County => "county",
            LocationKind::State => "state",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FeatureParseError {
    #[error("missing attribute {0}")]
    MissingAttribute(&'static str),

    #[error("attribute {0} has an unsupported value")]
    InvalidAttribute(&'static str),
}

/// A feature picked on one of the map layers.
pub trait SelectionTarget {
    fn selector(&self) -> Selector;
    fn display_name(&self) -> String;
    fn fips(&self) -> Option<&str>;
    fn state_name(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountyFeature {
    pub fips: String,
    pub name: String,
    pub state_name: Option<String>,
}

impl CountyFeature {
    pub fn from_attributes(attributes: &Map<String, Value>) -> Result<Self, FeatureParseError> {
        let fips = match attributes.get("FIPS") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            // Numeric FIPS lose their leading zero
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|n| format!("{:05}", n))
                .ok_or(FeatureParseError::InvalidAttribute("FIPS"))?,
            Some(Value::Null) | None => return Err(FeatureParseError::MissingAttribute("FIPS")),
            Some(_) => return Err(FeatureParseError::InvalidAttribute("FIPS")),
        };

        let name = string_attribute(attributes, "NAME")?
            .ok_or(FeatureParseError::MissingAttribute("NAME"))?;
        let state_name = string_attribute(attributes, "STATE_NAME")?;

        Ok(Self {
            fips,
            name,
            state_name,
        })
    }
}

impl SelectionTarget for CountyFeature {
    fn selector(&self) -> Selector {
        Selector::County {
            fips: self.fips.clone(),
        }
    }

    fn display_name(&self) -> String {
        match &self.state_name {
            Some(state) => format!("{}, {}", self.name, state),
            None => self.name.clone(),
        }
    }

    fn fips(&self) -> Option<&str> {
        Some(self.fips.as_str())
    }

    fn state_name(&self) -> Option<&str> {
        self.state_name.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateFeature {
    pub state_name: String,
    pub state_fips: Option<String>,
}

impl StateFeature {
    pub fn from_attributes(attributes: &Map<String, Value>) -> Result<Self, FeatureParseError> {
        let state_name = string_attribute(attributes, "STATE_NAME")?
            .ok_or(FeatureParseError::MissingAttribute("STATE_NAME"))?;
        let state_fips = string_attribute(attributes, "STATE_FIPS")?;

        Ok(Self {
            state_name,
            state_fips,
        })
    }
}

impl SelectionTarget for StateFeature {
    fn selector(&self) -> Selector {
        Selector::State {
            name: self.state_name.clone(),
        }
    }

    fn display_name(&self) -> String {
        self.state_name.clone()
    }

    fn fips(&self) -> Option<&str> {
        self.state_fips.as_deref()
    }

    fn state_name(&self) -> Option<&str> {
        Some(self.state_name.as_str())
    }
}

fn string_attribute(
    attributes: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, FeatureParseError> {
    match attributes.get(key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(FeatureParseError::InvalidAttribute(key)),
    }
}

/// The currently selected feature, as shown in the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionLocation {
    pub kind: LocationKind,
    pub identifier: String,
    pub display_name: String,
    pub fips: Option<String>,
    pub state_name: Option<String>,
}

impl SelectionLocation {
    pub fn from_target<T: SelectionTarget + ?Sized>(target: &T) -> Self {
        let selector = target.selector();
        Self {
            kind: selector.kind(),
            identifier: selector.identifier().to_string(),
            display_name: target.display_name(),
            fips: target.fips().map(str::to_string),
            state_name: target.state_name().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_selector_from_parts() {
        assert_eq!(
            Selector::from_parts(Some("06037"), None).unwrap(),
            Selector::County {
                fips: "06037".to_string()
            }
        );
        assert_eq!(
            Selector::from_parts(None, Some(" California ")).unwrap(),
            Selector::State {
                name: "California".to_string()
            }
        );
        assert_eq!(
            Selector::from_parts(Some("06037"), Some("California")),
            Err(SelectorError::Ambiguous)
        );
        assert_eq!(Selector::from_parts(None, None), Err(SelectorError::Missing));
        assert_eq!(
            Selector::from_parts(Some("  "), None),
            Err(SelectorError::Missing)
        );
    }

    #[test]
    fn test_selector_display() {
        let selector = Selector::State {
            name: "Texas".to_string(),
        };
        assert_eq!(selector.to_string(), "state:Texas");
    }

    #[test]
    fn test_county_feature_from_attributes() {
        let county = CountyFeature::from_attributes(&attributes(json!({
            "FIPS": "06037",
            "NAME": "Los Angeles County",
            "STATE_NAME": "California"
        })))
        .unwrap();

        assert_eq!(county.fips, "06037");
        assert_eq!(county.display_name(), "Los Angeles County, California");
        assert_eq!(
            county.selector(),
            Selector::County {
                fips: "06037".to_string()
            }
        );
    }

    #[test]
    fn test_county_feature_numeric_fips() {
        let county = CountyFeature::from_attributes(&attributes(json!({
            "FIPS": 6037,
            "NAME": "Los Angeles County"
        })))
        .unwrap();

        assert_eq!(county.fips, "06037");
        assert_eq!(county.display_name(), "Los Angeles County");
    }

    #[test]
    fn test_county_feature_rejects_bad_bags() {
        assert_eq!(
            CountyFeature::from_attributes(&attributes(json!({"NAME": "Nowhere"}))),
            Err(FeatureParseError::MissingAttribute("FIPS"))
        );
        assert_eq!(
            CountyFeature::from_attributes(&attributes(json!({"FIPS": true, "NAME": "X"}))),
            Err(FeatureParseError::InvalidAttribute("FIPS"))
        );
        assert_eq!(
            CountyFeature::from_attributes(&attributes(json!({"FIPS": "01001"}))),
            Err(FeatureParseError::MissingAttribute("NAME"))
        );
    }

    #[test]
    fn test_state_feature_and_location() {
        let state = StateFeature::from_attributes(&attributes(json!({
            "STATE_NAME": "Washington",
            "STATE_FIPS": "53"
        })))
        .unwrap();

        let location = SelectionLocation::from_target(&state);
        assert_eq!(location.kind, LocationKind::State);
        assert_eq!(location.identifier, "Washington");
        assert_eq!(location.display_name, "Washington");
        assert_eq!(location.fips.as_deref(), Some("53"));

        assert_eq!(
            StateFeature::from_attributes(&attributes(json!({"STATE_FIPS": "53"}))),
            Err(FeatureParseError::MissingAttribute("STATE_NAME"))
        );
    }
}
