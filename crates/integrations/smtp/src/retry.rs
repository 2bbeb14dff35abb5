use herald_core::DeliveryReport;
use lettre::Message;
use tracing::{debug, error, warn};

use crate::backend::EmailBackend;

/// Send a message, retrying failed attempts immediately.
///
/// Makes at most `max_attempts` attempts (at least one) with no delay between
/// them. A retryable failure (connection problems, transient SMTP replies) is
/// logged and retried; a permanent rejection ends the loop early. Failures are
/// reported through the returned [`DeliveryReport`], never as an error.
pub async fn send_message(
    backend: &dyn EmailBackend,
    message: &Message,
    max_attempts: u32,
) -> DeliveryReport {
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        debug!(
            attempt,
            max_attempts,
            backend = backend.backend_name(),
            "sending message"
        );

        match backend.send(message).await {
            Ok(()) => {
                debug!(attempt, "message accepted");
                return DeliveryReport::delivered(attempt);
            }
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                warn!(attempt, max_attempts, error = %err, "send attempt failed, retrying");
            }
            Err(err) => {
                error!(
                    attempt,
                    max_attempts,
                    error = %err,
                    retryable = err.is_retryable(),
                    "message could not be delivered"
                );
                return DeliveryReport::undelivered(attempt);
            }
        }
    }

    DeliveryReport::undelivered(max_attempts)
}
