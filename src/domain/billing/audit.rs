//! Audit trail returned from a processed webhook.

use serde::Serialize;

/// Ordered, human-readable record of completed workflow steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuditTrail(Vec<String>);

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one step description.
    pub fn record(&mut self, entry: impl Into<String>) {
        self.0.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.0
    }
}

/// Successful result of a webhook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookOutcome {
    /// Always `"processed"`.
    pub outcome: &'static str,
    pub message: String,
    pub audit_trail: AuditTrail,
}

impl WebhookOutcome {
    pub const PROCESSED: &'static str = "processed";

    pub fn processed(message: impl Into<String>, audit_trail: AuditTrail) -> Self {
        Self {
            outcome: Self::PROCESSED,
            message: message.into(),
            audit_trail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_keeps_insertion_order() {
        let mut trail = AuditTrail::new();
        trail.record("first");
        trail.record(String::from("second"));
        assert_eq!(trail.entries(), &["first".to_string(), "second".to_string()]);
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn trail_serializes_as_list() {
        let mut trail = AuditTrail::new();
        trail.record("step");
        assert_eq!(serde_json::to_value(&trail).unwrap(), serde_json::json!(["step"]));
    }

    #[test]
    fn outcome_is_processed() {
        let outcome = WebhookOutcome::processed("done", AuditTrail::new());
        assert_eq!(outcome.outcome, "processed");
        assert!(outcome.audit_trail.is_empty());
    }
}
