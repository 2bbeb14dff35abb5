//! Message body rendering.
//!
//! Turns a notification template (a list of [`TemplateBlock`]s) into the HTML
//! body of an email. Block fields are `MiniJinja` string templates rendered
//! against the notification variables; the results are laid out by an
//! embedded HTML template with auto-escaping.
//!
//! [`TemplateBlock`]: herald_core::TemplateBlock

pub mod error;
pub mod render;

pub use error::RenderError;
pub use render::{create_message_body, create_multi_message_body};
