use std::env::var;

use dotenvy::dotenv;

use crate::{application::services::messenger::SendEndpoint, domain::errors::DomainError};

pub const DEFAULT_API_URL: &str = "https://graph.facebook.com/v2.6/me/messages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub access_token: String,
}

impl Config {
    /// Reads `MESSENGER_API_URL` and `MESSENGER_ACCESS_TOKEN`, loading `.env`
    /// first when present.
    pub fn try_parse() -> Result<Config, DomainError> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("MESSENGER_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let access_token = lookup("MESSENGER_ACCESS_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                DomainError::Configuration(
                    "An error occurred while getting MESSENGER_ACCESS_TOKEN env param".to_string(),
                )
            })?;

        Ok(Config {
            api_url,
            access_token,
        })
    }

    pub fn endpoint(&self) -> SendEndpoint {
        SendEndpoint::new(self.api_url.clone(), self.access_token.clone())
    }
}
