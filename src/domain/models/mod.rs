pub mod button;
pub mod element;
pub mod message;
pub mod quick_reply;
pub mod recipient;

pub use button::{Button, ButtonType};
pub use element::{Element, MAX_BUTTONS};
pub use message::{
    GenericMessage, MAX_ELEMENTS, NotificationType, OutboundMessage, QuickReplyMessage,
    TextMessage,
};
pub use quick_reply::{ContentType, MAX_QUICK_REPLIES, QuickReply};
pub use recipient::Recipient;
