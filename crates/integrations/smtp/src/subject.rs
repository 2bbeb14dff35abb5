/// Build the subject line of a notification email.
///
/// An explicit `subject` wins. Otherwise a `name` is upper-cased and prefixed
/// to the notification text. Otherwise the notification text is used as is.
/// Empty strings count as absent.
///
/// # Examples
///
/// ```
/// use herald_smtp::build_subject;
///
/// assert_eq!(build_subject("Task due", None, None), "Task due");
/// assert_eq!(build_subject("Task due", Some("inc-7"), None), "INC-7 - Task due");
/// assert_eq!(build_subject("Task due", Some("inc-7"), Some("Custom")), "Custom");
/// ```
pub fn build_subject(notification_text: &str, name: Option<&str>, subject: Option<&str>) -> String {
    if let Some(subject) = subject.filter(|s| !s.is_empty()) {
        return subject.to_owned();
    }
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        return format!("{} - {notification_text}", name.to_uppercase());
    }
    notification_text.to_owned()
}
