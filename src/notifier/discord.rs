use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::app::DeliveryError;
use crate::config::DiscordConfig;
use crate::domain::NotificationPayload;
use crate::notifier::{Delivery, Destination};

/// Discord REST client authenticated as a bot.
pub struct DiscordClient {
    client: Client,
    api_base: String,
    token: String,
}

impl DiscordClient {
    pub fn new(client: Client, config: &DiscordConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn channel_url(&self, channel_id: &str) -> String {
        format!("{}/channels/{}", self.api_base, channel_id)
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }
}

#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
    embeds: Vec<Embed<'a>>,
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    author: EmbedAuthor<'a>,
    description: &'a str,
    timestamp: String,
    footer: EmbedFooter<'a>,
    color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<EmbedImage<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedAuthor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct EmbedFooter<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct EmbedImage<'a> {
    url: &'a str,
}

impl<'a> From<&'a NotificationPayload> for CreateMessage<'a> {
    fn from(payload: &'a NotificationPayload) -> Self {
        CreateMessage {
            content: &payload.content,
            embeds: vec![Embed {
                title: &payload.title,
                url: payload.link.as_deref(),
                author: EmbedAuthor {
                    name: &payload.author.name,
                    icon_url: payload.author.icon_url.as_deref(),
                },
                description: &payload.excerpt,
                timestamp: payload.timestamp.to_rfc3339(),
                footer: EmbedFooter {
                    text: &payload.footer_text,
                },
                color: payload.color.0,
                image: payload.image_url.as_deref().map(|url| EmbedImage { url }),
            }],
        }
    }
}

#[async_trait]
impl Delivery for DiscordClient {
    async fn resolve(&self, destination_id: &str) -> Result<Option<Destination>, DeliveryError> {
        let response = self
            .client
            .get(self.channel_url(destination_id))
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        match response.status() {
            // Forbidden means the bot cannot see the channel, which is the same as absent
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => {
                let channel: Channel = response.json().await?;
                Ok(Some(Destination {
                    id: channel.id,
                    name: channel.name,
                }))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DeliveryError::Rejected { status, body })
            }
        }
    }

    async fn send(
        &self,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(format!("{}/messages", self.channel_url(&destination.id)))
            .header(AUTHORIZATION, self.auth_header())
            .json(&CreateMessage::from(payload))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected { status, body });
        }

        Ok(())
    }
}
