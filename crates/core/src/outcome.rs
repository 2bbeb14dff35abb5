use serde::{Deserialize, Serialize};

/// Result of handing a message to a mail transport.
///
/// `delivered` is the success flag callers branch on. A transport that
/// rejected every attempt yields `delivered == false` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// Whether one of the attempts was accepted by the server.
    pub delivered: bool,
    /// Number of attempts made, including the successful one.
    pub attempts: u32,
}

impl DeliveryReport {
    /// A report for a message accepted on attempt `attempts`.
    #[must_use]
    pub fn delivered(attempts: u32) -> Self {
        Self {
            delivered: true,
            attempts,
        }
    }

    /// A report for a message that every attempt failed to deliver.
    #[must_use]
    pub fn undelivered(attempts: u32) -> Self {
        Self {
            delivered: false,
            attempts,
        }
    }
}
