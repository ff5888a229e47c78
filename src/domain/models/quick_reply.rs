use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Quick replies the platform accepts per message. Not enforced here.
pub const MAX_QUICK_REPLIES: usize = 13;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContentType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "location")]
    Location,
    #[serde(rename = "user_phone_number")]
    PhoneNumber,
    #[serde(rename = "user_email")]
    Email,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Location => "location",
            ContentType::PhoneNumber => "user_phone_number",
            ContentType::Email => "user_email",
        }
    }
}

impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(ContentType::Text),
            "location" => Ok(ContentType::Location),
            "user_phone_number" => Ok(ContentType::PhoneNumber),
            "user_email" => Ok(ContentType::Email),
            _ => Err(DomainError::UnknownVariant {
                kind: "quick reply content type",
                value: value.to_string(),
            }),
        }
    }
}

/// Tappable suggestion chip shown under a message.
///
/// Which of `title`, `payload` and `image_url` the platform expects depends on
/// `content_type`; empty strings are omitted from the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickReply {
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payload: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
}

impl QuickReply {
    pub fn new(
        content_type: ContentType,
        title: impl Into<String>,
        payload: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            content_type,
            title: title.into(),
            payload: payload.into(),
            image_url: image_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_quick_reply_serialization() {
        let qr = QuickReply::new(ContentType::Text, "Red", "PICK_RED", "http://red.png");
        let value = serde_json::to_value(&qr).unwrap();
        assert_eq!(
            value,
            json!({
                "content_type": "text",
                "title": "Red",
                "payload": "PICK_RED",
                "image_url": "http://red.png"
            })
        );
    }

    #[test]
    fn test_location_quick_reply_omits_empty_fields() {
        let qr = QuickReply::new(ContentType::Location, "", "", "");
        let value = serde_json::to_value(&qr).unwrap();
        assert_eq!(value, json!({ "content_type": "location" }));
    }

    #[test]
    fn test_content_type_wire_constants() {
        for content_type in [
            ContentType::Text,
            ContentType::Location,
            ContentType::PhoneNumber,
            ContentType::Email,
        ] {
            let value = serde_json::to_value(content_type).unwrap();
            assert_eq!(value, json!(content_type.as_str()));
            assert_eq!(content_type.as_str().parse::<ContentType>().unwrap(), content_type);
        }
    }

    #[test]
    fn test_unknown_content_type_is_rejected() {
        let err = "sticker".parse::<ContentType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown quick reply content type: sticker");
    }
}
