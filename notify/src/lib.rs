//! Discord implementation of the notification sink.
//!
//! Posts go to a single fixed channel through the plain HTTP API, no
//! gateway connection. A threaded reply is a message reference to the
//! post being replied to; the returned post id is the sent message id.

use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, CreateMessage, Http, MessageId, MessageReference};
use thiserror::Error;
use tracing::debug;

use riftwatch_shared::{
    traits::{NotificationSink, SinkError},
    PostId,
};

#[derive(Debug, Error)]
pub enum DiscordSinkError {
    #[error("'{0}' is not a valid message id")]
    InvalidPostId(String),
}

/// [`NotificationSink`] posting to one Discord channel.
#[derive(Debug, Clone)]
pub struct DiscordSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl NotificationSink for DiscordSink {
    async fn post(&self, text: &str, reply_to: Option<&PostId>) -> Result<PostId, SinkError> {
        let mut message = CreateMessage::new().content(text);

        if let Some(post_id) = reply_to {
            let reference = MessageReference::from((self.channel_id, parse_post_id(post_id)?));
            message = message.reference_message(reference);
        }

        debug!("posting to channel {}", self.channel_id);
        let sent = self.channel_id.send_message(&self.http, message).await?;

        Ok(sent.id.to_string())
    }
}

fn parse_post_id(post_id: &PostId) -> Result<MessageId, DiscordSinkError> {
    post_id
        .parse::<u64>()
        .map(MessageId::new)
        .map_err(|_| DiscordSinkError::InvalidPostId(post_id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_post_id_accepts_message_ids() {
        assert_eq!(
            parse_post_id(&"1234567890".to_string()).unwrap(),
            MessageId::new(1234567890)
        );
        assert!(parse_post_id(&"not-a-number".to_string()).is_err());
    }
}
