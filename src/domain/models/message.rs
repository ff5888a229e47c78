use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{
    button::Button,
    element::Element,
    quick_reply::{ContentType, MAX_QUICK_REPLIES, QuickReply},
    recipient::Recipient,
};
use crate::domain::errors::DomainError;

/// Elements the platform accepts in one generic template. Not enforced here.
pub const MAX_ELEMENTS: usize = 10;

/// Delivery priority hint for the receiving device.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Regular,
    SilentPush,
    NoPush,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Regular => "REGULAR",
            NotificationType::SilentPush => "SILENT_PUSH",
            NotificationType::NoPush => "NO_PUSH",
        }
    }
}

impl FromStr for NotificationType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "REGULAR" => Ok(NotificationType::Regular),
            "SILENT_PUSH" => Ok(NotificationType::SilentPush),
            "NO_PUSH" => Ok(NotificationType::NoPush),
            _ => Err(DomainError::UnknownVariant {
                kind: "notification type",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum AttachmentType {
    Template,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum TemplateType {
    Generic,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct TextContent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct QuickReplyContent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    quick_replies: Vec<QuickReply>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct GenericContent {
    attachment: Attachment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct Attachment {
    #[serde(rename = "type")]
    attachment_type: AttachmentType,
    payload: Payload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct Payload {
    template_type: TemplateType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    elements: Vec<Element>,
}

/// Plain text message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextMessage {
    message: TextContent,
    recipient: Recipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notification_type: Option<NotificationType>,
}

impl TextMessage {
    pub fn new(recipient_id: i64, text: impl Into<String>) -> Self {
        Self {
            message: TextContent { text: text.into() },
            recipient: Recipient::new(recipient_id),
            notification_type: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }
}

/// Text message with quick reply chips attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickReplyMessage {
    message: QuickReplyContent,
    recipient: Recipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notification_type: Option<NotificationType>,
}

impl QuickReplyMessage {
    pub fn new(recipient_id: i64, text: impl Into<String>) -> Self {
        Self {
            message: QuickReplyContent {
                text: text.into(),
                quick_replies: Vec::new(),
            },
            recipient: Recipient::new(recipient_id),
            notification_type: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.message.quick_replies
    }

    pub fn add_quick_reply(&mut self, quick_reply: QuickReply) {
        self.message.quick_replies.push(quick_reply);
        if self.message.quick_replies.len() > MAX_QUICK_REPLIES {
            warn!(
                recipient = self.recipient.id,
                quick_replies = self.message.quick_replies.len(),
                "message exceeds the platform quick reply limit of {}",
                MAX_QUICK_REPLIES
            );
        }
    }

    pub fn add_new_quick_reply(
        &mut self,
        content_type: ContentType,
        title: impl Into<String>,
        payload: impl Into<String>,
        image_url: impl Into<String>,
    ) {
        self.add_quick_reply(QuickReply::new(content_type, title, payload, image_url));
    }
}

/// Generic template message: a horizontally scrolled carousel of cards.
///
/// Always carries a `template` attachment with a `generic` payload; neither
/// can be changed after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenericMessage {
    message: GenericContent,
    recipient: Recipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notification_type: Option<NotificationType>,
}

impl GenericMessage {
    pub fn new(recipient_id: i64) -> Self {
        Self {
            message: GenericContent {
                attachment: Attachment {
                    attachment_type: AttachmentType::Template,
                    payload: Payload {
                        template_type: TemplateType::Generic,
                        elements: Vec::new(),
                    },
                },
            },
            recipient: Recipient::new(recipient_id),
            notification_type: None,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.message.attachment.payload.elements
    }

    /// Appends a card. The platform shows at most [`MAX_ELEMENTS`].
    pub fn add_element(&mut self, element: Element) {
        let elements = &mut self.message.attachment.payload.elements;
        elements.push(element);
        if elements.len() > MAX_ELEMENTS {
            warn!(
                recipient = self.recipient.id,
                elements = elements.len(),
                "generic message exceeds the platform element limit of {}",
                MAX_ELEMENTS
            );
        }
    }

    /// Same as `add_element(Element::new(..))`. Pass `""` for unused strings
    /// and an empty vec for no buttons.
    pub fn add_new_element(
        &mut self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        item_url: impl Into<String>,
        image_url: impl Into<String>,
        buttons: Vec<Button>,
    ) {
        self.add_element(Element::new(title, subtitle, item_url, image_url, buttons));
    }
}

macro_rules! impl_common_accessors {
    ($($message:ty),+) => {
        $(
            impl $message {
                pub fn recipient(&self) -> Recipient {
                    self.recipient
                }

                pub fn notification_type(&self) -> Option<NotificationType> {
                    self.notification_type
                }

                pub fn set_notification_type(&mut self, notification_type: NotificationType) {
                    self.notification_type = Some(notification_type);
                }

                pub fn with_notification_type(mut self, notification_type: NotificationType) -> Self {
                    self.set_notification_type(notification_type);
                    self
                }
            }
        )+
    };
}

impl_common_accessors!(TextMessage, QuickReplyMessage, GenericMessage);

/// Any message the send endpoint accepts.
///
/// Serializes as the wrapped message itself, without a variant tag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OutboundMessage {
    Text(TextMessage),
    QuickReply(QuickReplyMessage),
    Generic(GenericMessage),
}

impl OutboundMessage {
    pub fn recipient(&self) -> Recipient {
        match self {
            OutboundMessage::Text(m) => m.recipient(),
            OutboundMessage::QuickReply(m) => m.recipient(),
            OutboundMessage::Generic(m) => m.recipient(),
        }
    }

    pub fn notification_type(&self) -> Option<NotificationType> {
        match self {
            OutboundMessage::Text(m) => m.notification_type(),
            OutboundMessage::QuickReply(m) => m.notification_type(),
            OutboundMessage::Generic(m) => m.notification_type(),
        }
    }

    pub fn set_notification_type(&mut self, notification_type: NotificationType) {
        match self {
            OutboundMessage::Text(m) => m.set_notification_type(notification_type),
            OutboundMessage::QuickReply(m) => m.set_notification_type(notification_type),
            OutboundMessage::Generic(m) => m.set_notification_type(notification_type),
        }
    }

    pub fn with_notification_type(mut self, notification_type: NotificationType) -> Self {
        self.set_notification_type(notification_type);
        self
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::Text(_) => "text",
            OutboundMessage::QuickReply(_) => "quick_reply",
            OutboundMessage::Generic(_) => "generic",
        }
    }

    pub fn to_json(&self) -> Result<Value, DomainError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(raw)?)
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let content = value.get("message").and_then(Value::as_object);
        let is_generic = content.is_some_and(|c| c.contains_key("attachment"));
        let is_quick_reply = content.is_some_and(|c| c.contains_key("quick_replies"));

        if is_generic {
            serde_json::from_value(value).map(OutboundMessage::Generic)
        } else if is_quick_reply {
            serde_json::from_value(value).map(OutboundMessage::QuickReply)
        } else {
            serde_json::from_value(value).map(OutboundMessage::Text)
        }
    }
}

impl<'de> Deserialize<'de> for OutboundMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        OutboundMessage::from_value(value).map_err(de::Error::custom)
    }
}

impl From<TextMessage> for OutboundMessage {
    fn from(value: TextMessage) -> Self {
        OutboundMessage::Text(value)
    }
}

impl From<QuickReplyMessage> for OutboundMessage {
    fn from(value: QuickReplyMessage) -> Self {
        OutboundMessage::QuickReply(value)
    }
}

impl From<GenericMessage> for OutboundMessage {
    fn from(value: GenericMessage) -> Self {
        OutboundMessage::Generic(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_message_serialization() {
        let value = serde_json::to_value(TextMessage::new(123, "hi")).unwrap();
        assert_eq!(
            value,
            json!({ "message": { "text": "hi" }, "recipient": { "id": "123" } })
        );
    }

    #[test]
    fn test_empty_text_is_omitted() {
        let value = serde_json::to_value(TextMessage::new(123, "")).unwrap();
        assert_eq!(value, json!({ "message": {}, "recipient": { "id": "123" } }));
    }

    #[test]
    fn test_notification_type_is_emitted_when_set() {
        let message = TextMessage::new(1, "hi").with_notification_type(NotificationType::SilentPush);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["notification_type"], "SILENT_PUSH");
        assert_eq!(message.notification_type(), Some(NotificationType::SilentPush));
    }

    #[test]
    fn test_notification_type_parsing() {
        assert_eq!("NO_PUSH".parse::<NotificationType>().unwrap(), NotificationType::NoPush);
        assert_eq!(NotificationType::Regular.as_str(), "REGULAR");
        assert!("no_push".parse::<NotificationType>().is_err());
    }

    #[test]
    fn test_new_generic_message_has_fixed_skeleton() {
        let value = serde_json::to_value(GenericMessage::new(7)).unwrap();
        assert_eq!(
            value,
            json!({
                "message": {
                    "attachment": {
                        "type": "template",
                        "payload": { "template_type": "generic" }
                    }
                },
                "recipient": { "id": "7" }
            })
        );
    }

    #[test]
    fn test_add_element_preserves_call_order() {
        let mut message = GenericMessage::new(7);
        for i in 0..12 {
            message.add_new_element(format!("card {i}"), "", "", "", vec![]);
        }

        let titles: Vec<_> = message.elements().iter().map(|e| e.title.as_str()).collect();
        let expected: Vec<_> = (0..12).map(|i| format!("card {i}")).collect();
        assert_eq!(titles, expected);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["message"]["attachment"]["type"], "template");
        assert_eq!(value["message"]["attachment"]["payload"]["template_type"], "generic");
        assert_eq!(
            value["message"]["attachment"]["payload"]["elements"]
                .as_array()
                .unwrap()
                .len(),
            12
        );
    }

    #[test]
    fn test_quick_replies_are_appended_in_order() {
        let mut message = QuickReplyMessage::new(9, "Pick a color");
        message.add_new_quick_reply(ContentType::Text, "Red", "RED", "");
        message.add_quick_reply(QuickReply::new(ContentType::Location, "", "", ""));

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "message": {
                    "text": "Pick a color",
                    "quick_replies": [
                        { "content_type": "text", "title": "Red", "payload": "RED" },
                        { "content_type": "location" }
                    ]
                },
                "recipient": { "id": "9" }
            })
        );
    }

    #[test]
    fn test_quick_reply_message_without_replies_omits_array() {
        let value = serde_json::to_value(QuickReplyMessage::new(9, "")).unwrap();
        assert_eq!(value, json!({ "message": {}, "recipient": { "id": "9" } }));
    }

    #[test]
    fn test_outbound_message_dispatch() {
        let message: OutboundMessage = QuickReplyMessage::new(5, "q")
            .with_notification_type(NotificationType::NoPush)
            .into();
        assert_eq!(message.recipient(), Recipient::new(5));
        assert_eq!(message.notification_type(), Some(NotificationType::NoPush));
        assert_eq!(message.kind(), "quick_reply");
    }

    #[test]
    fn test_outbound_message_resolves_variant_from_shape() {
        let text = OutboundMessage::from_json_str(
            r#"{"message":{"text":"hi"},"recipient":{"id":"1"}}"#,
        )
        .unwrap();
        assert!(matches!(text, OutboundMessage::Text(_)));

        let quick = OutboundMessage::from_json_str(
            r#"{"message":{"text":"hi","quick_replies":[{"content_type":"location"}]},"recipient":{"id":"1"}}"#,
        )
        .unwrap();
        assert!(matches!(quick, OutboundMessage::QuickReply(_)));

        let generic = OutboundMessage::from_json_str(
            r#"{"message":{"attachment":{"type":"template","payload":{"template_type":"generic"}}},"recipient":{"id":"1"}}"#,
        )
        .unwrap();
        assert!(matches!(generic, OutboundMessage::Generic(_)));
    }

    #[test]
    fn test_foreign_attachment_type_is_rejected() {
        let result = OutboundMessage::from_json_str(
            r#"{"message":{"attachment":{"type":"image","payload":{"template_type":"generic"}}},"recipient":{"id":"1"}}"#,
        );
        assert!(matches!(result, Err(DomainError::Serialization(_))));
    }
}
