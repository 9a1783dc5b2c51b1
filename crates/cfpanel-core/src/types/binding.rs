use serde::{Deserialize, Serialize};

use super::common::{loose_text, skip_invalid};

/// A saved domain binding, as listed by `GET /api/list`
///
/// The backend lists whatever config files it has on disk, so both fields
/// read leniently: missing or `null` values become empty strings. The
/// tunnel token and config path are not decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Fully qualified domain; the identity used by run and delete
    #[serde(default, deserialize_with = "loose_text")]
    pub domain: String,

    /// Local port the tunnel forwards to
    #[serde(default, deserialize_with = "loose_text")]
    pub local_port: String,
}

/// Payload of a successful binding listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingList {
    /// Saved bindings, in backend order; entries that are not objects are skipped
    #[serde(default, deserialize_with = "skip_invalid")]
    pub items: Vec<Binding>,
}

/// Body of `POST /api/run` and `POST /api/delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRequest {
    /// Binding domain
    pub domain: String,
}

/// Payload of a successful `POST /api/run`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunResult {
    /// PID of the started tunnel process
    #[serde(default)]
    pub pid: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_port_accepts_string_and_number() {
        let list: BindingList = serde_json::from_value(json!({
            "ok": true,
            "items": [
                {"domain": "a.example.com", "local_port": "8080", "api_token": "secret"},
                {"domain": "b.example.com", "local_port": 3000}
            ]
        }))
        .unwrap();

        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].local_port, "8080");
        assert_eq!(list.items[1].local_port, "3000");
    }

    #[test]
    fn test_domain_request_body() {
        let body = serde_json::to_string(&DomainRequest {
            domain: "foo.example.com".into(),
        })
        .unwrap();
        assert_eq!(body, r#"{"domain":"foo.example.com"}"#);
    }

    #[test]
    fn test_odd_entries_do_not_sink_the_list() {
        let list: BindingList = serde_json::from_value(json!({
            "ok": true,
            "items": [
                {"domain": "a.example.com", "local_port": "8080"},
                {"domain": "b.example.com", "local_port": null},
                {"local_port": 9000},
                "stray.json"
            ]
        }))
        .unwrap();

        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[1].domain, "b.example.com");
        assert_eq!(list.items[1].local_port, "");
        assert_eq!(list.items[2].domain, "");
        assert_eq!(list.items[2].local_port, "9000");
    }
}
