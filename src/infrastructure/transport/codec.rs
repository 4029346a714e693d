//! Wire codec for coordination messages: bincode with fixed-width
//! integer encoding. The serde enum tag discriminates proposal variants;
//! adding a proposal variant extends the tag space without touching the
//! codec.

use super::messages::CoordinationMessage;
use crate::foundation::Result;
use bincode::Options;

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

pub fn encode_coordination_message(message: &CoordinationMessage) -> Result<Vec<u8>> {
    Ok(wire_options().serialize(message)?)
}

pub fn decode_coordination_message(bytes: &[u8]) -> Result<CoordinationMessage> {
    Ok(wire_options().deserialize(bytes)?)
}
