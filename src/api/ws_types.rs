use serde::Serialize;

use crate::models::{GrowthChallenge, Trade};

/// Messages broadcast to all connected WebSocket clients. The trade snapshot
/// carries the full journal (newest first) and replaces client state
/// wholesale, mirroring a document-store subscription.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsMessage {
    #[serde(rename = "trades_snapshot")]
    TradesSnapshot(Vec<Trade>),

    #[serde(rename = "challenge_update")]
    ChallengeUpdate(GrowthChallenge),
}
