use std::time::Duration;

use reqwest::Client;

/// Minimal Telegram Bot API client; only `sendMessage` is needed.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, bot_token: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        })
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&serde_json::json!({
                "chat_id": chat_id,
                "text": text,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram API error {}: {}", status, body);
        }
        Ok(())
    }
}
