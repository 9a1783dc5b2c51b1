use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Accept a JSON string or number, keeping it as text.
///
/// The backend echoes form values back as strings but older configs store
/// ports as numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Read any JSON value as text; `null` reads as empty.
pub(crate) fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

/// Decode a list entry by entry, dropping entries that do not fit `T`.
///
/// A `null` list reads as empty.
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(|entry| match T::deserialize(&entry) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!(error = %e, %entry, "skipping list entry");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Port {
        #[serde(default, deserialize_with = "loose_text")]
        port: String,
    }

    #[derive(Debug, Deserialize)]
    struct Ports {
        #[serde(default, deserialize_with = "skip_invalid")]
        ports: Vec<Port>,
    }

    #[test]
    fn test_loose_text_reads_any_scalar() {
        let ports: Ports = serde_json::from_value(json!({
            "ports": [{"port": "80"}, {"port": 443}, {"port": null}, {"port": true}, {}]
        }))
        .unwrap();
        let text: Vec<&str> = ports.ports.iter().map(|p| p.port.as_str()).collect();
        assert_eq!(text, ["80", "443", "", "true", ""]);
    }

    #[test]
    fn test_skip_invalid_drops_only_bad_entries() {
        let ports: Ports =
            serde_json::from_value(json!({"ports": [{"port": 1}, "junk", 7, {"port": 2}]}))
                .unwrap();
        assert_eq!(ports.ports.len(), 2);

        let empty: Ports = serde_json::from_value(json!({"ports": null})).unwrap();
        assert!(empty.ports.is_empty());
    }
}
