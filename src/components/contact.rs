use crate::config::ContactConfig;
use crate::dom::{FormNode, Node};
use crate::forms::{error_message, FormTransport};

/// Result of one submit attempt. Each maps to exactly one status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form action still carries the placeholder token.
    NotConfigured,
    /// The honeypot field was filled in.
    Spam,
    Sent,
    /// Backend answered non-2xx; carries its joined error messages, if any.
    Rejected(Option<String>),
    NetworkError,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent)
    }

    pub fn message(&self, cfg: &ContactConfig) -> String {
        match self {
            Self::NotConfigured => cfg.not_configured_message.clone(),
            Self::Spam => cfg.spam_message.clone(),
            Self::Sent => cfg.success_message.clone(),
            Self::Rejected(Some(msg)) => msg.clone(),
            Self::Rejected(None) => cfg.failure_message.clone(),
            Self::NetworkError => cfg.network_error_message.clone(),
        }
    }
}

/// `<button type="submit">` or `<input type="submit">`.
pub fn is_submit_control<N: Node>(el: &N) -> bool {
    let tag = el.tag_name();
    (tag == "button" || tag == "input")
        && el
            .attribute("type")
            .map(|t| t.trim().eq_ignore_ascii_case("submit"))
            .unwrap_or(false)
}

/// Only submissions started from an explicit submit control are handled by
/// script; everything else is left to the browser.
pub fn should_intercept<N: Node>(submitter: Option<&N>) -> bool {
    submitter.map(is_submit_control).unwrap_or(false)
}

#[derive(Clone)]
pub struct ContactForm<F: FormNode> {
    form: F,
    status: Option<F>,
    honeypot: Option<F>,
    cfg: ContactConfig,
}

impl<F: FormNode> ContactForm<F> {
    pub fn from_root(root: &F, cfg: &ContactConfig) -> Option<Self> {
        let form = root.query(&cfg.form_selector)?;
        Some(ContactForm {
            status: root.query(&cfg.status_selector),
            honeypot: form.query(&cfg.honeypot_selector),
            form,
            cfg: cfg.clone(),
        })
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Local checks, in order. `Err` carries the outcome to report.
    pub fn validate(&self) -> Result<(), SubmitOutcome> {
        let action = self.form.attribute("action").unwrap_or_default();
        if !self.cfg.placeholder_token.is_empty() && action.contains(&self.cfg.placeholder_token) {
            return Err(SubmitOutcome::NotConfigured);
        }
        if let Some(trap) = &self.honeypot {
            if !trap.value().is_empty() {
                return Err(SubmitOutcome::Spam);
            }
        }
        Ok(())
    }

    async fn send<T: FormTransport>(&self, transport: &T) -> SubmitOutcome {
        let url = self.form.action_url();
        let fields = self.form.fields();
        match transport.post(&url, &fields).await {
            Ok(reply) if reply.ok() => SubmitOutcome::Sent,
            Ok(reply) => {
                log::warn!("[contact] backend returned {}", reply.status);
                SubmitOutcome::Rejected(error_message(&reply.body))
            }
            Err(e) => {
                log::warn!("[contact] {}", e);
                SubmitOutcome::NetworkError
            }
        }
    }

    /// Validate, post, then render the outcome. The form is cleared on success.
    pub async fn submit<T: FormTransport>(&self, transport: &T) -> SubmitOutcome {
        let outcome = match self.validate() {
            Ok(()) => self.send(transport).await,
            Err(outcome) => outcome,
        };
        if outcome.is_success() {
            self.form.reset();
        }
        self.show_status(&outcome);
        outcome
    }

    pub fn show_status(&self, outcome: &SubmitOutcome) {
        let status = match &self.status {
            Some(el) => el,
            None => return,
        };
        let ok = outcome.is_success();
        status.set_text(&outcome.message(&self.cfg));
        status.add_class(&self.cfg.show_class);
        status.set_class(&self.cfg.success_class, ok);
        status.set_class(&self.cfg.error_class, !ok);
    }
}
