use reqwest::header::ACCEPT;
use reqwest::multipart::Form;

use super::{FormTransport, HttpReply, SubmitError};

/// Formspree-style endpoint: multipart POST, JSON back.
/// No timeout and no retry; the platform defaults apply.
#[derive(Debug, Clone, Default)]
pub struct FormspreeTransport {
    client: reqwest::Client,
}

impl FormspreeTransport {
    pub fn new() -> Self {
        FormspreeTransport {
            client: reqwest::Client::new(),
        }
    }
}

impl FormTransport for FormspreeTransport {
    async fn post(&self, url: &str, fields: &[(String, String)]) -> Result<HttpReply, SubmitError> {
        let form = fields
            .iter()
            .fold(Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()));

        let resp = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmitError(format!("Form request failed: {}", e)))?;

        let status = resp.status().as_u16();
        // An unreadable body is treated like an empty one.
        let body = resp.text().await.unwrap_or_default();
        Ok(HttpReply { status, body })
    }
}
