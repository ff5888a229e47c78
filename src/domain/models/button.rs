use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    /// Opens a web link.
    WebUrl,
    /// Sends the button payload back to the webhook.
    Postback,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::WebUrl => "web_url",
            ButtonType::Postback => "postback",
        }
    }
}

impl FromStr for ButtonType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "web_url" => Ok(ButtonType::WebUrl),
            "postback" => Ok(ButtonType::Postback),
            _ => Err(DomainError::UnknownVariant {
                kind: "button type",
                value: value.to_string(),
            }),
        }
    }
}

/// Button on a generic template element.
///
/// Web link buttons carry `url`, postback buttons carry `payload`. Nothing
/// stops a caller from filling both; the platform decides what to do with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Button {
    #[serde(rename = "type")]
    pub button_type: ButtonType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payload: String,
}

impl Button {
    pub fn web_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            button_type: ButtonType::WebUrl,
            url: url.into(),
            title: title.into(),
            payload: String::new(),
        }
    }

    /// Button that sends `payload` back to the webhook when pressed.
    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            button_type: ButtonType::Postback,
            url: String::new(),
            title: title.into(),
            payload: payload.into(),
        }
    }
}
