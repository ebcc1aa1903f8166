//! Request/response records for the HTTP API. Validation happens here, once,
//! before any core logic runs.

use crate::domain::{
    AttachmentSpec, BroadcastRequest, BroadcastResult, ContentSource, DomainError, SendRequest,
    TemplateContext,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SEND_REQUIRED: &str = "phone and message (or template) are required";
pub const BROADCAST_REQUIRED: &str = "phones[] and message (or template) are required";

/// Body of `POST /send`.
#[derive(Debug, Default, Deserialize)]
pub struct SendBody {
    pub phone: Option<Value>,
    pub message: Option<String>,
    pub template: Option<String>,
    pub data: Option<Map<String, Value>>,
    pub image_path: Option<String>,
    pub pdf_path: Option<String>,
}

/// Body of `POST /broadcast`.
#[derive(Debug, Default, Deserialize)]
pub struct BroadcastBody {
    pub phones: Option<Value>,
    pub message: Option<String>,
    pub template: Option<String>,
    pub data: Option<Map<String, Value>>,
    pub image_path: Option<String>,
    pub pdf_path: Option<String>,
}

/// Body of `POST /inbound`, forwarded by the bridge.
#[derive(Debug, Deserialize)]
pub struct InboundBody {
    pub from: String,
    #[serde(default)]
    pub body: String,
}

impl SendBody {
    pub fn into_request(self) -> Result<SendRequest, DomainError> {
        let missing = || DomainError::MissingContent(SEND_REQUIRED.to_string());
        let recipient = self.phone.as_ref().and_then(recipient_text).ok_or_else(missing)?;
        let content = content_source(self.message, self.template, self.data).ok_or_else(missing)?;
        Ok(SendRequest {
            recipient,
            content,
            attachment: AttachmentSpec {
                image_path: self.image_path,
                pdf_path: self.pdf_path,
            },
        })
    }
}

impl BroadcastBody {
    /// Validated request plus the `phones` entries as sent, for echoing in failures.
    pub fn into_request(self) -> Result<(BroadcastRequest, Vec<Value>), DomainError> {
        let phones = match self.phones {
            Some(Value::Array(items)) if !items.is_empty() => items,
            None | Some(Value::Null) => {
                return Err(DomainError::MissingContent(BROADCAST_REQUIRED.to_string()));
            }
            Some(_) => return Err(DomainError::InvalidRequest(BROADCAST_REQUIRED.to_string())),
        };
        let content = content_source(self.message, self.template, self.data)
            .ok_or_else(|| DomainError::MissingContent(BROADCAST_REQUIRED.to_string()))?;
        // Every entry is attempted; unusable ones fail individually in the coordinator.
        let recipients = phones
            .iter()
            .map(|p| match p {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        let request = BroadcastRequest {
            recipients,
            content,
            attachment: AttachmentSpec {
                image_path: self.image_path,
                pdf_path: self.pdf_path,
            },
        };
        Ok((request, phones))
    }
}

/// Template wins over literal text; empty strings count as absent.
fn content_source(
    message: Option<String>,
    template: Option<String>,
    data: Option<Map<String, Value>>,
) -> Option<ContentSource> {
    if let Some(template) = template.filter(|t| !t.is_empty()) {
        return Some(ContentSource::Template {
            template,
            context: flatten_context(data.unwrap_or_default()),
        });
    }
    message.filter(|m| !m.is_empty()).map(ContentSource::Text)
}

/// Strings verbatim, null empty, everything else as compact JSON text.
pub fn flatten_context(data: Map<String, Value>) -> TemplateContext {
    data.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}

/// Recipient as text. Strings and numbers are accepted; empty or null is absent.
fn recipient_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub ok: bool,
    pub sent: bool,
}

#[derive(Debug, Serialize)]
pub struct FailureEntry {
    /// The `phones` entry exactly as the caller sent it.
    pub phone: Value,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub ok: bool,
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<FailureEntry>,
}

impl BroadcastResponse {
    pub fn new(result: BroadcastResult, phones: &[Value]) -> Self {
        Self {
            ok: true,
            sent: result.sent_count,
            failed: result.failed_count,
            errors: result
                .failures
                .into_iter()
                .map(|f| FailureEntry {
                    phone: phones
                        .get(f.position)
                        .cloned()
                        .unwrap_or(Value::String(f.recipient)),
                    error: f.error,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InboundResponse {
    pub ok: bool,
    pub replied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn send_body(value: Value) -> SendBody {
        serde_json::from_value(value).unwrap()
    }

    fn broadcast_body(value: Value) -> BroadcastBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_send_requires_phone_and_content() {
        for body in [
            json!({"message": "hi"}),
            json!({"phone": "", "message": "hi"}),
            json!({"phone": "91234567"}),
            json!({"phone": "91234567", "message": "", "template": ""}),
        ] {
            assert_eq!(
                send_body(body).into_request(),
                Err(DomainError::MissingContent(SEND_REQUIRED.into()))
            );
        }
    }

    #[test]
    fn test_send_numeric_phone_and_template() {
        let req = send_body(json!({
            "phone": 91234567,
            "message": "ignored",
            "template": "Hi {{name}}, {{age}}",
            "data": {"name": "Amy", "age": 9},
            "image_path": "pic.png"
        }))
        .into_request()
        .unwrap();

        assert_eq!(req.recipient, "91234567");
        assert_eq!(req.content.render(), "Hi Amy, 9");
        assert_eq!(req.attachment, AttachmentSpec::image("pic.png"));
    }

    #[test]
    fn test_empty_template_falls_back_to_message() {
        let req = send_body(json!({"phone": "91234567", "message": "plain", "template": ""}))
            .into_request()
            .unwrap();
        assert_eq!(req.content, ContentSource::Text("plain".into()));
    }

    #[test]
    fn test_flatten_context() {
        let data = json!({"s": "x", "n": 1.5, "b": true, "z": null, "o": {"k": 1}});
        let Value::Object(map) = data else {
            unreachable!()
        };
        let ctx = flatten_context(map);
        assert_eq!(ctx["s"], "x");
        assert_eq!(ctx["n"], "1.5");
        assert_eq!(ctx["b"], "true");
        assert_eq!(ctx["z"], "");
        assert_eq!(ctx["o"], r#"{"k":1}"#);
    }

    #[test]
    fn test_broadcast_missing_fields_are_missing_content() {
        for body in [
            json!({"message": "hi"}),
            json!({"phones": null, "message": "hi"}),
            json!({"phones": ["91234567"]}),
            json!({"phones": ["91234567"], "message": ""}),
        ] {
            assert_eq!(
                broadcast_body(body).into_request(),
                Err(DomainError::MissingContent(BROADCAST_REQUIRED.into()))
            );
        }
    }

    #[test]
    fn test_broadcast_phones_not_a_list_is_invalid_request() {
        for body in [
            json!({"phones": "91234567", "message": "hi"}),
            json!({"phones": 91234567, "message": "hi"}),
            json!({"phones": {"a": "91234567"}, "message": "hi"}),
            json!({"phones": [], "message": "hi"}),
        ] {
            assert_eq!(
                broadcast_body(body).into_request(),
                Err(DomainError::InvalidRequest(BROADCAST_REQUIRED.into()))
            );
        }
    }

    #[test]
    fn test_broadcast_keeps_every_entry_in_order() {
        let (req, phones) = broadcast_body(json!({
            "phones": ["91234567", 98765432, null, ""],
            "message": "hi"
        }))
        .into_request()
        .unwrap();
        assert_eq!(req.recipients, vec!["91234567", "98765432", "null", ""]);
        assert_eq!(
            phones,
            vec![json!("91234567"), json!(98765432), json!(null), json!("")]
        );
    }

    #[test]
    fn test_broadcast_response_shape() {
        let phones = vec![json!("91234567"), json!("bad"), json!(1234)];
        let mut result = BroadcastResult::default();
        result.record_sent();
        result.record_failure(1, "bad", &DomainError::InvalidIdentifier("bad".into()));
        result.record_failure(2, "1234", &DomainError::InvalidIdentifier("1234".into()));

        let json = serde_json::to_value(BroadcastResponse::new(result, &phones)).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["sent"], 1);
        assert_eq!(json["failed"], 2);
        assert_eq!(json["errors"][0]["phone"], "bad");
        assert_eq!(json["errors"][1]["phone"], json!(1234));
    }
}
