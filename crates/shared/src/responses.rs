//! Response bodies for the REST API.

use serde::{Deserialize, Serialize};

use crate::views::{
    CharacterStatusView, MissionInfoView, MissionSummaryView, ProgressView, RewardsView, RoomView,
};

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Bearer token for subsequent requests.
    pub key: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoldResponse {
    pub gold: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyResponse {
    pub message: String,
    pub gold_remaining: i64,
    pub item_quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellResponse {
    pub message: String,
    pub gold_earned: i64,
    pub total_gold: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionListResponse {
    pub missions: Vec<MissionSummaryView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartMissionResponse {
    pub success: bool,
    pub message: String,
    pub mission_info: MissionInfoView,
    pub current_room: RoomView,
    pub character_status: CharacterStatusView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionActionResponse {
    pub success: bool,
    pub message: String,
    pub current_room: RoomView,
    pub character_status: CharacterStatusView,
    pub mission_progress: ProgressView,
    /// Present only on the action that completes the mission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<RewardsView>,
}
