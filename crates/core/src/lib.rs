pub mod message_type;
pub mod notification;
pub mod outcome;
pub mod template;

pub use message_type::MessageType;
pub use notification::Notification;
pub use outcome::DeliveryReport;
pub use template::TemplateBlock;
