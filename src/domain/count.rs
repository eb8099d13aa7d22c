// Lenient count deserialization for service attributes
use serde::{Deserialize, Deserializer};

/// Accepts integers, floats (statistics come back as doubles) and nulls.
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;

    Ok(value
        .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)))
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_count")]
        value: i64,
    }

    #[test]
    fn test_deserialize_count_variants() {
        let row: Row = serde_json::from_str(r#"{"value": 42}"#).unwrap();
        assert_eq!(row.value, 42);

        let row: Row = serde_json::from_str(r#"{"value": 1203.0}"#).unwrap();
        assert_eq!(row.value, 1203);

        let row: Row = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(row.value, 0);

        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.value, 0);
    }
}
