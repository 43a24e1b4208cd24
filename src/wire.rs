//! Frame format shared by the bot and the chat relay.

use serde::{Deserialize, Serialize};

/// One chat message as the relay carries it, one per text frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatWireMessage {
    pub id: String,
    pub room: String,
    pub author: String,
    pub body: String,
    pub timestamp: String,
}
