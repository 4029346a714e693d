use super::codec::encode_coordination_message;
use super::messages::CoordinationMessage;
use super::{ChannelEnvelope, ChannelRecv, ChannelSend, ChannelSubscription, SenderFilter};
use crate::foundation::{Hash32, Result};
use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as SyncMutex};
use tokio::sync::{broadcast, Mutex};

/// In-memory broadcast hub shared by the mock channels of a test
/// network. One topic per channel name.
pub struct MockHub {
    topics: Mutex<HashMap<Hash32, broadcast::Sender<ChannelEnvelope>>>,
}

impl MockHub {
    pub fn new() -> Self {
        Self { topics: Mutex::new(HashMap::new()) }
    }

    async fn topic(&self, topic: Hash32) -> broadcast::Sender<ChannelEnvelope> {
        let mut guard = self.topics.lock().await;
        guard.entry(topic).or_insert_with(|| broadcast::channel(256).0).clone()
    }
}

impl Default for MockHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One participant's handle to a named broadcast channel. Carries the
/// participant's network public key as the authenticated sender
/// identity.
pub struct MockChannel {
    hub: Arc<MockHub>,
    channel_name: String,
    sender_public_key: Vec<u8>,
    filter: SyncMutex<Option<SenderFilter>>,
}

impl MockChannel {
    pub fn new(hub: Arc<MockHub>, channel_name: impl Into<String>, sender_public_key: Vec<u8>) -> Self {
        Self { hub, channel_name: channel_name.into(), sender_public_key, filter: SyncMutex::new(None) }
    }

    fn topic_id(&self) -> Hash32 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"tessera-coordination/v1");
        hasher.update(self.channel_name.as_bytes());
        *hasher.finalize().as_bytes()
    }

    /// Publishes raw payload bytes under this channel's sender identity.
    /// Lets adversarial tests inject undecodable payloads.
    pub async fn send_raw(&self, payload: Vec<u8>) -> Result<()> {
        let envelope =
            ChannelEnvelope { sender_public_key: self.sender_public_key.clone(), payload };
        let sender = self.hub.topic(self.topic_id()).await;
        // `broadcast::Sender::send` errors when there are no receivers.
        // Publishing to a topic nobody listens on is not an error in a
        // real transport, so treat it as success.
        let _ = sender.send(envelope);
        Ok(())
    }
}

#[async_trait]
impl ChannelSend for MockChannel {
    async fn send(&self, message: &CoordinationMessage) -> Result<()> {
        let payload = encode_coordination_message(message)?;
        self.send_raw(payload).await
    }
}

#[async_trait]
impl ChannelRecv for MockChannel {
    async fn subscribe(&self) -> Result<ChannelSubscription> {
        let sender = self.hub.topic(self.topic_id()).await;
        let mut receiver = sender.subscribe();
        let filter = match self.filter.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let stream = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(envelope) => {
                        if let Some(filter) = &filter {
                            if !filter(&envelope.sender_public_key) {
                                continue;
                            }
                        }
                        yield envelope;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("mock channel: subscription lagged skipped={}", skipped);
                    }
                }
            }
        };
        Ok(ChannelSubscription::new(Box::pin(stream)))
    }

    fn set_membership_filter(&self, filter: SenderFilter) {
        match self.filter.lock() {
            Ok(mut guard) => *guard = Some(filter),
            Err(poisoned) => *poisoned.into_inner() = Some(filter),
        }
    }
}
