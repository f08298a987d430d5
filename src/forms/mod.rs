pub mod formspree;

use serde_json::Value;

pub use formspree::FormspreeTransport;

// ── Types ─────────────────────────────────────────────

/// Status and raw body of a form backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError(pub String);

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Posts form fields to a form-processing backend.
#[allow(async_fn_in_trait)]
pub trait FormTransport {
    async fn post(&self, url: &str, fields: &[(String, String)]) -> Result<HttpReply, SubmitError>;
}

// ── Error bodies ──────────────────────────────────────

/// Pull a user-facing message out of a failure body shaped like
/// `{"errors":[{"message":"..."}]}`. Anything else, including bodies that are
/// not JSON, yields `None`.
pub fn error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let errors = parsed.get("errors")?.as_array()?;
    let joined = errors
        .iter()
        .map(|e| e.get("message").and_then(|m| m.as_str()).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
