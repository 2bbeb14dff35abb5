use herald_provider::ProviderError;
use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Mailboxes};

/// Build a single-part `text/html` email.
///
/// `recipient` and `cc` may each hold one address or a comma-separated list.
/// An empty `cc` adds no `Cc` header. Every cc address is also part of the
/// SMTP envelope, so copied recipients actually receive the message.
///
/// Returns [`ProviderError::Configuration`] for an unusable sender and
/// [`ProviderError::ExecutionFailed`] for unusable recipients.
pub fn create_html_message(
    sender: &str,
    recipient: &str,
    cc: &str,
    subject: &str,
    body: &str,
) -> Result<Message, ProviderError> {
    let from_mailbox: Mailbox = sender
        .parse()
        .map_err(|e| ProviderError::Configuration(format!("invalid from address: {e}")))?;

    if recipient.trim().is_empty() {
        return Err(ProviderError::ExecutionFailed(
            "recipient must not be empty".into(),
        ));
    }
    let to_mailboxes: Mailboxes = recipient
        .parse()
        .map_err(|e| ProviderError::ExecutionFailed(format!("invalid recipient address: {e}")))?;

    let mut builder = Message::builder().from(from_mailbox).subject(subject);

    for mailbox in to_mailboxes {
        builder = builder.to(mailbox);
    }

    if !cc.trim().is_empty() {
        let cc_mailboxes: Mailboxes = cc
            .parse()
            .map_err(|e| ProviderError::ExecutionFailed(format!("invalid CC address: {e}")))?;
        for mailbox in cc_mailboxes {
            builder = builder.cc(mailbox);
        }
    }

    builder
        .header(ContentType::TEXT_HTML)
        .body(body.to_owned())
        .map_err(|e| ProviderError::ExecutionFailed(format!("failed to build email: {e}")))
}
