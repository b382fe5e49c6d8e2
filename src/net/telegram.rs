//! Telegram bot announcement delivery
//!
//! One GET against the bot API's sendMessage method. Success is judged by
//! HTTP status alone; the response body is only kept for diagnostics.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::core::error::NotifyError;

const API_BASE: &str = "https://api.telegram.org";
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one bot and one target chat
pub struct TelegramBot {
  http: Client,
  token: String,
  chat_id: String,
  api_base: String,
}

impl TelegramBot {
  pub fn new(token: String, chat_id: String) -> Result<Self, NotifyError> {
    Self::with_base(token, chat_id, API_BASE.to_string())
  }

  fn with_base(token: String, chat_id: String, api_base: String) -> Result<Self, NotifyError> {
    let http = Client::builder().timeout(API_TIMEOUT).build()?;

    Ok(Self {
      http,
      token,
      chat_id,
      api_base,
    })
  }

  /// Test constructor pointing the bot API at a mock server
  #[cfg(test)]
  pub(crate) fn with_mock_base(token: &str, chat_id: &str, base: &str) -> Result<Self, NotifyError> {
    Self::with_base(token.to_string(), chat_id.to_string(), base.to_string())
  }

  /// Send one message to the configured chat
  ///
  /// chat_id and text travel as query parameters and are percent-encoded,
  /// so messages may safely contain `&`, `%`, and newlines.
  pub fn send_message(&self, text: &str) -> Result<(), NotifyError> {
    let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);

    let response = self
      .http
      .get(url)
      .query(&[("chat_id", self.chat_id.as_str()), ("text", text)])
      .send()?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().unwrap_or_default();
      return Err(NotifyError::Rejected { status, body });
    }

    debug!(chat_id = %self.chat_id, "announcement delivered");
    Ok(())
  }
}
