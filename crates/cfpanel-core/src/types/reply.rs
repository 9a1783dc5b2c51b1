use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A backend reply in the `{ok, error?, ...}` envelope.
///
/// The raw JSON is kept alongside the typed payload so callers can show
/// the server's answer verbatim, whatever it contains.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    /// The `ok` flag (a missing flag reads as `false`)
    pub ok: bool,

    /// The `error` string, if the backend sent one
    pub error: Option<String>,

    /// Typed payload, decoded only when `ok` is true and the body fits `T`
    pub data: Option<T>,

    raw: Value,
}

impl<T: DeserializeOwned> Reply<T> {
    /// Decode a reply from a parsed JSON body.
    ///
    /// Never fails: a body whose payload does not fit `T` still yields a
    /// reply carrying the raw JSON, with no typed data.
    pub fn from_value(raw: Value) -> Self {
        let ok = raw.get("ok").and_then(Value::as_bool).unwrap_or(false);
        let error = raw.get("error").and_then(Value::as_str).map(String::from);
        let data = if ok {
            T::deserialize(&raw)
                .map_err(|e| debug!(error = %e, "reply payload not decoded"))
                .ok()
        } else {
            None
        };

        Self {
            ok,
            error,
            data,
            raw,
        }
    }
}

impl<T> Reply<T> {
    /// The JSON body exactly as received
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Two-space indented rendering of the raw body
    #[must_use]
    pub fn pretty(&self) -> String {
        format!("{:#}", self.raw)
    }

    /// Single-line rendering of the raw body
    #[must_use]
    pub fn compact(&self) -> String {
        self.raw.to_string()
    }

    /// The backend's error text, or the whole payload when it sent none
    #[must_use]
    pub fn failure_text(&self) -> String {
        self.error.clone().unwrap_or_else(|| self.compact())
    }

    /// Consume the reply, returning the typed payload if any
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Payload of replies that only carry a human-readable message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message text (e.g. "password changed")
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_reply_decodes_payload() {
        let reply: Reply<Message> =
            Reply::from_value(json!({"ok": true, "message": "password changed"}));
        assert!(reply.ok);
        assert_eq!(
            reply.data.unwrap().message.as_deref(),
            Some("password changed")
        );
    }

    #[test]
    fn test_failed_reply_keeps_error_and_skips_payload() {
        let reply: Reply<Message> =
            Reply::from_value(json!({"ok": false, "error": "old password incorrect"}));
        assert!(!reply.ok);
        assert!(reply.data.is_none());
        assert_eq!(reply.failure_text(), "old password incorrect");
    }

    #[test]
    fn test_failure_text_falls_back_to_payload() {
        let reply: Reply<Message> = Reply::from_value(json!({"ok": false}));
        assert_eq!(reply.failure_text(), r#"{"ok":false}"#);
    }

    #[test]
    fn test_pretty_keeps_server_key_order() {
        let reply: Reply<Message> =
            Reply::from_value(json!({"ok": true, "message": "bye"}));
        assert_eq!(reply.pretty(), "{\n  \"ok\": true,\n  \"message\": \"bye\"\n}");
    }

    #[test]
    fn test_missing_ok_reads_as_failure() {
        let reply: Reply<Message> = Reply::from_value(json!({"message": "??"}));
        assert!(!reply.ok);
    }

    #[test]
    fn test_unexpected_payload_keeps_raw_reply() {
        let body = json!({"ok": true, "domain": null, "pid": "4242"});
        let reply: Reply<crate::TempTunnel> = Reply::from_value(body.clone());
        assert!(reply.ok);
        assert!(reply.data.is_none());
        assert_eq!(reply.raw(), &body);
        assert_eq!(reply.compact(), r#"{"ok":true,"domain":null,"pid":"4242"}"#);
    }
}
