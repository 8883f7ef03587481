//! MidianText Shared - Wire types for the REST API
//!
//! Request bodies, response bodies, and the read-only views the engine
//! returns. Field names follow the JSON the game clients already speak,
//! which is why several of them are Portuguese.
//!
//! Views carry raw `uuid::Uuid` values instead of domain ID newtypes.

pub mod requests;
pub mod responses;
pub mod views;

pub use requests::{
    CreateCharacterRequest, CredentialsRequest, MissionActionRequest, StartMissionRequest,
    TradeRequest,
};
pub use responses::{
    BuyResponse, ErrorBody, GoldResponse, LoginResponse, MessageResponse, MissionActionResponse,
    MissionListResponse, SellResponse, ServiceInfo, StartMissionResponse,
};
pub use views::{
    CharacterStatsView, CharacterStatusView, CharacterView, ClassView, EnemyView,
    MissionInfoView, MissionSummaryView, ProgressView, RewardsView, RoomView, ShopItemView,
    TreasureContentsView, TreasureView,
};
