//! Interface to the authenticated broadcast channel.
//!
//! The channel is modeled as two one-way interfaces configured at
//! construction, so neither side holds a back-reference to the
//! coordination executor: [`ChannelSend`] publishes coordination
//! messages best-effort, [`ChannelRecv`] hands out subscriptions and
//! accepts the membership filter the core installs.
//!
//! Envelopes carry the sender's serialized network public key and the
//! raw payload bytes. Decoding is the receiver's job: a payload that
//! fails to decode must stay observable so the follower can attribute
//! it when it came from the leader.

pub mod codec;
pub mod messages;
pub mod mock;

use crate::foundation::Result;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Arc;

pub use messages::CoordinationMessage;

/// Predicate over a sender's serialized network public key. Senders
/// failing the predicate are dropped before delivery.
pub type SenderFilter = Arc<dyn Fn(&[u8]) -> bool + Send + Sync>;

/// A single message delivered by the broadcast channel.
#[derive(Clone, Debug)]
pub struct ChannelEnvelope {
    /// Serialized network public key of the sender, authenticated by the
    /// transport.
    pub sender_public_key: Vec<u8>,
    /// Encoded payload; see [`codec`].
    pub payload: Vec<u8>,
}

pub struct ChannelSubscription {
    inner: BoxStream<'static, ChannelEnvelope>,
}

impl ChannelSubscription {
    pub fn new(inner: BoxStream<'static, ChannelEnvelope>) -> Self {
        Self { inner }
    }

    pub async fn next(&mut self) -> Option<ChannelEnvelope> {
        self.inner.next().await
    }
}

#[async_trait]
pub trait ChannelSend: Send + Sync {
    /// Publishes the message to the channel. Best-effort: no ack, no
    /// retransmission.
    async fn send(&self, message: &CoordinationMessage) -> Result<()>;
}

#[async_trait]
pub trait ChannelRecv: Send + Sync {
    async fn subscribe(&self) -> Result<ChannelSubscription>;

    /// Installs the membership filter. Messages from senders outside the
    /// group roster are dropped before they reach any subscription
    /// opened afterwards.
    fn set_membership_filter(&self, filter: SenderFilter);
}
