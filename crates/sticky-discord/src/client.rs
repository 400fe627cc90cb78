use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use sticky_engine::platform::{ChatPlatform, PlatformError, PostedMessage};
use sticky_types::StickyContent;

use crate::payload::{CreateDmPayload, MessagePayload, Snowflake, classify_error};

const USER_AGENT: &str = concat!("DiscordBot (sticky, ", env!("CARGO_PKG_VERSION"), ")");
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Bot-token REST client for the handful of Discord endpoints the engine uses.
#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    api_base: String,
}

impl DiscordClient {
    pub fn new(api_base: &str, bot_token: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {}", bot_token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Send and decode, mapping non-2xx onto [`PlatformError`].
    async fn call<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        channel_id: &str,
        message_id: Option<&str>,
    ) -> Result<T, PlatformError> {
        let resp = self.execute(request, channel_id, message_id).await?;
        resp.json::<T>()
            .await
            .map_err(|e| PlatformError::Transport(format!("Invalid response body: {}", e)))
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        channel_id: &str,
        message_id: Option<&str>,
    ) -> Result<reqwest::Response, PlatformError> {
        let resp = request
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let status = resp.status();
        trace!("Discord responded {} for channel {}", status, channel_id);
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(classify_error(status.as_u16(), &body, channel_id, message_id))
    }

    async fn open_dm(&self, user_id: &str) -> Result<String, PlatformError> {
        let request = self
            .http
            .post(self.url("/users/@me/channels"))
            .json(&CreateDmPayload { recipient_id: user_id });
        let channel: Snowflake = self.call(request, user_id, None).await?;
        Ok(channel.id)
    }
}

#[async_trait]
impl ChatPlatform for DiscordClient {
    async fn latest_message(&self, channel_id: &str) -> Result<Option<PostedMessage>, PlatformError> {
        let request = self
            .http
            .get(self.url(&format!("/channels/{}/messages", channel_id)))
            .query(&[("limit", "1")]);
        let messages: Vec<Snowflake> = self.call(request, channel_id, None).await?;
        Ok(messages.into_iter().next().map(|m| PostedMessage { id: m.id }))
    }

    async fn fetch_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Option<PostedMessage>, PlatformError> {
        let request = self
            .http
            .get(self.url(&format!("/channels/{}/messages/{}", channel_id, message_id)));
        match self.call::<Snowflake>(request, channel_id, Some(message_id)).await {
            Ok(message) => Ok(Some(PostedMessage { id: message.id })),
            Err(PlatformError::MessageNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn send_message(&self, channel_id: &str, content: &StickyContent) -> Result<String, PlatformError> {
        let request = self
            .http
            .post(self.url(&format!("/channels/{}/messages", channel_id)))
            .json(&MessagePayload::for_send(content));
        let message: Snowflake = self.call(request, channel_id, None).await?;
        debug!("Posted {} message {} in channel {}", content.kind(), message.id, channel_id);
        Ok(message.id)
    }

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        content: &StickyContent,
    ) -> Result<(), PlatformError> {
        let request = self
            .http
            .patch(self.url(&format!("/channels/{}/messages/{}", channel_id, message_id)))
            .json(&MessagePayload::for_edit(content));
        self.execute(request, channel_id, Some(message_id)).await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), PlatformError> {
        let request = self
            .http
            .delete(self.url(&format!("/channels/{}/messages/{}", channel_id, message_id)));
        self.execute(request, channel_id, Some(message_id)).await?;
        Ok(())
    }

    async fn send_direct_message(&self, user_id: &str, content: &StickyContent) -> Result<(), PlatformError> {
        let dm_channel = self.open_dm(user_id).await?;
        self.send_message(&dm_channel, content).await?;
        Ok(())
    }
}
