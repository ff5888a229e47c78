pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::messenger::{Messenger, MessengerClient, SendEndpoint};
pub use config::Config;
pub use domain::errors::DomainError;
pub use domain::models::{
    Button, ButtonType, ContentType, Element, GenericMessage, NotificationType, OutboundMessage,
    QuickReply, QuickReplyMessage, Recipient, TextMessage,
};
