use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of notification being sent.
///
/// Selects the heading of the rendered email and is carried through logs so
/// that deliveries can be grouped by purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    IncidentNotification,
    IncidentDailyReport,
    IncidentExecutiveReport,
    IncidentFeedbackDailyReport,
    IncidentParticipantWelcome,
    IncidentRatingFeedback,
    IncidentResourcesMessage,
    IncidentStatusReport,
    IncidentTaskList,
    IncidentTaskReminder,
    EvergreenReminder,
    CaseNotification,
}

impl MessageType {
    /// Human-readable heading used at the top of the email body.
    pub fn heading(self) -> &'static str {
        match self {
            Self::IncidentNotification => "Incident Notification",
            Self::IncidentDailyReport => "Incident Daily Report",
            Self::IncidentExecutiveReport => "Executive Report",
            Self::IncidentFeedbackDailyReport => "Incident Feedback Daily Report",
            Self::IncidentParticipantWelcome => "Welcome to the Incident",
            Self::IncidentRatingFeedback => "Incident Rating and Feedback",
            Self::IncidentResourcesMessage => "Incident Resources",
            Self::IncidentStatusReport => "Incident Status Report",
            Self::IncidentTaskList => "Incident Task List",
            Self::IncidentTaskReminder => "Incident Task Reminder",
            Self::EvergreenReminder => "Evergreen Reminder",
            Self::CaseNotification => "Case Notification",
        }
    }

    /// The `snake_case` identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IncidentNotification => "incident_notification",
            Self::IncidentDailyReport => "incident_daily_report",
            Self::IncidentExecutiveReport => "incident_executive_report",
            Self::IncidentFeedbackDailyReport => "incident_feedback_daily_report",
            Self::IncidentParticipantWelcome => "incident_participant_welcome",
            Self::IncidentRatingFeedback => "incident_rating_feedback",
            Self::IncidentResourcesMessage => "incident_resources_message",
            Self::IncidentStatusReport => "incident_status_report",
            Self::IncidentTaskList => "incident_task_list",
            Self::IncidentTaskReminder => "incident_task_reminder",
            Self::EvergreenReminder => "evergreen_reminder",
            Self::CaseNotification => "case_notification",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
