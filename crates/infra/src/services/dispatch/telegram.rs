use super::{IDispatchGateway, SendResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramDispatchGateway {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramDispatchGateway {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, TELEGRAM_API_BASE_URL.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }
}

#[async_trait::async_trait]
impl IDispatchGateway for TelegramDispatchGateway {
    async fn send(&self, address: &str, text: &str) -> SendResult {
        let body = SendMessageRequest {
            chat_id: address,
            text,
        };
        match self
            .client
            .post(&format!("{}/bot{}/sendMessage", self.base_url, self.token))
            .json(&body)
            .send()
            .await
        {
            Ok(res) => match res.json::<SendMessageResponse>().await {
                Ok(SendMessageResponse { ok: true, .. }) => SendResult::ok(),
                Ok(SendMessageResponse { description, .. }) => {
                    error!(
                        "[Rejected] Telegram sendMessage to {} failed. Description: {:?}",
                        address, description
                    );
                    SendResult::failed()
                }
                Err(e) => {
                    error!(
                        "[Unexpected Response] Telegram sendMessage error. Error message: {:?}",
                        e
                    );
                    SendResult::failed()
                }
            },
            Err(e) => {
                error!(
                    "[Network Error] Telegram sendMessage error. Error message: {:?}",
                    e
                );
                SendResult::failed()
            }
        }
    }
}
