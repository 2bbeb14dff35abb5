use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::message_type::MessageType;
use crate::template::TemplateBlock;

/// A request to deliver one notification to one recipient.
///
/// `name`, `subject` and `cc` control the envelope; everything else that the
/// body templates reference goes into `context`. When `items` is non-empty the
/// template is rendered once per item.
///
/// # Examples
///
/// ```
/// use herald_core::{MessageType, Notification};
///
/// let notification: Notification = serde_json::from_value(serde_json::json!({
///     "recipient": "oncall@example.com",
///     "notification_text": "Incident Notification",
///     "notification_type": "incident_notification",
///     "name": "inc-42"
/// }))
/// .unwrap();
/// assert_eq!(notification.notification_type, MessageType::IncidentNotification);
/// assert!(notification.items.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier, generated when absent.
    #[serde(default = "generate_id")]
    pub id: String,

    /// Recipient address, or a comma-separated list of addresses.
    pub recipient: String,

    /// Short notification text; the default subject line.
    pub notification_text: String,

    /// Blocks rendered into the message body.
    #[serde(default)]
    pub notification_template: Vec<TemplateBlock>,

    /// Kind of notification.
    pub notification_type: MessageType,

    /// Per-item variables for multi-section messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Value>,

    /// Name of the incident or case the notification is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Explicit subject line, overriding the generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Carbon-copy address(es).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    /// Additional template variables.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Notification {
    /// Create a notification with no template blocks and no extra variables.
    pub fn new(
        recipient: impl Into<String>,
        notification_text: impl Into<String>,
        notification_type: MessageType,
    ) -> Self {
        Self {
            id: generate_id(),
            recipient: recipient.into(),
            notification_text: notification_text.into(),
            notification_template: Vec::new(),
            notification_type,
            items: Vec::new(),
            name: None,
            subject: None,
            cc: None,
            context: Map::new(),
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: Vec<TemplateBlock>) -> Self {
        self.notification_template = template;
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    /// Add a template variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Variables visible to the body templates.
    ///
    /// Starts from `context`; `notification_text` and any set `name`,
    /// `subject` and `cc` are layered on top.
    pub fn template_vars(&self) -> Map<String, Value> {
        let mut vars = self.context.clone();
        vars.insert(
            "notification_text".to_owned(),
            Value::String(self.notification_text.clone()),
        );
        for (key, value) in [
            ("name", &self.name),
            ("subject", &self.subject),
            ("cc", &self.cc),
        ] {
            if let Some(value) = value {
                vars.insert(key.to_owned(), Value::String(value.clone()));
            }
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_is_generated() {
        let json = serde_json::json!({
            "recipient": "a@example.com",
            "notification_text": "hello",
            "notification_type": "case_notification"
        });
        let a: Notification = serde_json::from_value(json.clone()).unwrap();
        let b: Notification = serde_json::from_value(json).unwrap();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn missing_recipient_fails() {
        let json = serde_json::json!({
            "notification_text": "hello",
            "notification_type": "case_notification"
        });
        assert!(serde_json::from_value::<Notification>(json).is_err());
    }

    #[test]
    fn template_vars_layer_envelope_fields_over_context() {
        let notification =
            Notification::new("a@example.com", "Task due", MessageType::IncidentTaskReminder)
                .with_var("name", "shadowed")
                .with_var("owner", "alice")
                .with_name("inc-7");

        let vars = notification.template_vars();
        assert_eq!(vars["name"], "inc-7");
        assert_eq!(vars["owner"], "alice");
        assert_eq!(vars["notification_text"], "Task due");
        assert!(!vars.contains_key("subject"));
        assert!(!vars.contains_key("cc"));
    }

    #[test]
    fn full_payload_deserializes() {
        let json = serde_json::json!({
            "id": "n-1",
            "recipient": "a@example.com, b@example.com",
            "notification_text": "Daily report",
            "notification_type": "incident_daily_report",
            "notification_template": [{"title": "{{ name }}", "text": "{{ status }}"}],
            "items": [{"name": "inc-1", "status": "active"}],
            "subject": "Report",
            "cc": "lead@example.com",
            "context": {"organization": "acme"}
        });
        let n: Notification = serde_json::from_value(json).unwrap();
        assert_eq!(n.id, "n-1");
        assert_eq!(n.notification_template.len(), 1);
        assert_eq!(n.items.len(), 1);
        assert_eq!(n.subject.as_deref(), Some("Report"));
        assert_eq!(n.context["organization"], "acme");
    }
}
