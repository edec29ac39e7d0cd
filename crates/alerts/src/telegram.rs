//! Telegram delivery via the Bot HTTP API.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API returned status {0}")]
    Status(reqwest::StatusCode),
}

const API_BASE: &str = "https://api.telegram.org";
/// Fixed per-request timeout; sends are attempted exactly once.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimal sendMessage client bound to one chat.
pub struct TelegramClient {
    http: reqwest::Client,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Send a Markdown-formatted message to the configured chat.
    pub async fn send(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/sendMessage", API_BASE, self.token);
        let params = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "Markdown"),
            ("disable_web_page_preview", "true"),
        ];

        let response = self
            .http
            .post(&url)
            .form(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TelegramError::Status(response.status()));
        }
        Ok(())
    }
}
