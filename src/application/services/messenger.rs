use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::models::{
    Button, ContentType, Element, GenericMessage, OutboundMessage, QuickReply, QuickReplyMessage,
    TextMessage,
};

/// Where serialized messages are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEndpoint {
    pub api_url: String,
    pub access_token: String,
}

impl SendEndpoint {
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}?access_token={}", self.api_url, self.access_token)
    }
}

/// Delivers a serialized message to the platform and reports its verdict.
#[async_trait]
pub trait MessengerClient: Send + Sync {
    async fn send(&self, endpoint: &SendEndpoint, payload: &Value) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct Messenger {
    client: Arc<dyn MessengerClient>,
    endpoint: SendEndpoint,
}

impl Messenger {
    pub fn new(client: Arc<dyn MessengerClient>, endpoint: SendEndpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &SendEndpoint {
        &self.endpoint
    }

    pub fn new_text_message(&self, user_id: i64, text: impl Into<String>) -> TextMessage {
        TextMessage::new(user_id, text)
    }

    pub fn new_quick_reply_message(
        &self,
        user_id: i64,
        text: impl Into<String>,
    ) -> QuickReplyMessage {
        QuickReplyMessage::new(user_id, text)
    }

    pub fn new_generic_message(&self, user_id: i64) -> GenericMessage {
        GenericMessage::new(user_id)
    }

    pub fn new_element(
        &self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        item_url: impl Into<String>,
        image_url: impl Into<String>,
        buttons: Vec<Button>,
    ) -> Element {
        Element::new(title, subtitle, item_url, image_url, buttons)
    }

    pub fn new_quick_reply(
        &self,
        content_type: ContentType,
        title: impl Into<String>,
        payload: impl Into<String>,
        image_url: impl Into<String>,
    ) -> QuickReply {
        QuickReply::new(content_type, title, payload, image_url)
    }

    pub fn new_web_url_button(&self, title: impl Into<String>, url: impl Into<String>) -> Button {
        Button::web_url(title, url)
    }

    pub fn new_postback_button(
        &self,
        title: impl Into<String>,
        payload: impl Into<String>,
    ) -> Button {
        Button::postback(title, payload)
    }

    pub async fn send(&self, message: impl Into<OutboundMessage>) -> anyhow::Result<()> {
        let message = message.into();
        let payload = message.to_json()?;
        debug!(
            kind = message.kind(),
            recipient = message.recipient().id,
            "dispatching message"
        );
        self.client.send(&self.endpoint, &payload).await
    }

    /// Builds a text message for `user_id` and sends it right away.
    pub async fn send_text_message(
        &self,
        user_id: i64,
        text: impl Into<String>,
    ) -> anyhow::Result<()> {
        self.send(self.new_text_message(user_id, text)).await
    }
}
