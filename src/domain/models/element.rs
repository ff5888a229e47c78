use serde::{Deserialize, Serialize};
use tracing::warn;

use super::button::Button;

/// Buttons the platform accepts per element. Not enforced here.
pub const MAX_BUTTONS: usize = 3;

/// Card in a generic template message.
///
/// `title` is always sent. The other strings and `buttons` are left out of the
/// payload when empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub item_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl Element {
    /// Pass `""` for unused strings and an empty vec for no buttons.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        item_url: impl Into<String>,
        image_url: impl Into<String>,
        buttons: Vec<Button>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            item_url: item_url.into(),
            image_url: image_url.into(),
            buttons,
        }
    }

    pub fn add_web_url_button(&mut self, title: impl Into<String>, url: impl Into<String>) {
        self.push_button(Button::web_url(title, url));
    }

    pub fn add_postback_button(&mut self, title: impl Into<String>, payload: impl Into<String>) {
        self.push_button(Button::postback(title, payload));
    }

    fn push_button(&mut self, button: Button) {
        self.buttons.push(button);
        if self.buttons.len() > MAX_BUTTONS {
            warn!(
                title = %self.title,
                buttons = self.buttons.len(),
                "element exceeds the platform button limit of {}",
                MAX_BUTTONS
            );
        }
    }
}
