use serde::{Deserialize, Serialize};

/// One section of a notification template.
///
/// Every field is a `MiniJinja` string template rendered against the
/// notification variables at send time, so `"{{ name }} was updated"` picks up
/// the `name` variable. Missing fields are simply omitted from the output.
///
/// # Examples
///
/// ```
/// use herald_core::TemplateBlock;
///
/// let block: TemplateBlock = serde_json::from_value(serde_json::json!({
///     "title": "Status",
///     "text": "{{ status }}"
/// }))
/// .unwrap();
/// assert_eq!(block.title.as_deref(), Some("Status"));
/// assert!(block.button_text.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBlock {
    /// Section heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional link wrapped around the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,

    /// Section body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Label of the call-to-action button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,

    /// Target URL of the call-to-action button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_value: Option<String>,
}

impl TemplateBlock {
    /// Create a block with only a title and text.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Attach a call-to-action button.
    #[must_use]
    pub fn with_button(mut self, text: impl Into<String>, value: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self.button_value = Some(value.into());
        self
    }

    /// Link the section title to a URL.
    #[must_use]
    pub fn with_title_link(mut self, link: impl Into<String>) -> Self {
        self.title_link = Some(link.into());
        self
    }
}
