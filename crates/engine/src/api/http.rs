//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use midian_domain::MissionRuleError;
use midian_shared::{
    BuyResponse, CharacterView, ClassView, CreateCharacterRequest, CredentialsRequest, ErrorBody,
    GoldResponse, LoginResponse, MessageResponse, MissionActionRequest, MissionActionResponse,
    MissionInfoView, MissionListResponse, MissionSummaryView, RewardsView, RoomView, SellResponse,
    ServiceInfo, ShopItemView, StartMissionRequest, StartMissionResponse, TradeRequest,
};

use super::auth::AuthUser;
use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::{AuthError, CharacterError, MissionError, ShopError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/classes", get(list_classes))
        .route("/personagens", get(list_characters))
        .route("/personagens/criar", post(create_character))
        .route(
            "/personagens/{name}",
            get(get_character).delete(delete_character),
        )
        .route("/personagens/{name}/gold", get(get_character_gold))
        .route("/shop/items", get(list_shop_items))
        .route("/shop/buy", post(buy_item))
        .route("/shop/sell", post(sell_item))
        .route("/missions", get(list_missions))
        .route("/missions/start", post(start_mission))
        .route("/missions/action", post(mission_action))
        .route("/missions/{id}", get(get_mission))
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "MidianText RPG API".to_string(),
        status: "online".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Accounts
// =============================================================================

async fn register(
    State(app): State<Arc<App>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    app.use_cases
        .auth
        .register
        .execute(&req.username, &req.password)
        .await?;
    Ok(Json(MessageResponse::new("User created successfully")))
}

async fn login(
    State(app): State<Arc<App>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let key = app
        .use_cases
        .auth
        .login
        .execute(&req.username, &req.password)
        .await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        key,
    }))
}

async fn logout(State(app): State<Arc<App>>, user: AuthUser) -> Json<MessageResponse> {
    app.use_cases.auth.logout.execute(&user.token).await;
    tracing::info!(username = %user.username, "User logged out");
    Json(MessageResponse::new("Logged out"))
}

// =============================================================================
// Characters
// =============================================================================

async fn list_classes(State(app): State<Arc<App>>) -> Json<Vec<ClassView>> {
    Json(
        app.use_cases
            .character
            .classes()
            .into_iter()
            .map(ClassView::from)
            .collect(),
    )
}

async fn list_characters(
    State(app): State<Arc<App>>,
    user: AuthUser,
) -> Result<Json<Vec<CharacterView>>, ApiError> {
    let characters = app
        .use_cases
        .character
        .roster
        .list(&user.username)
        .await?;
    Ok(Json(characters.into_iter().map(CharacterView::from).collect()))
}

async fn create_character(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CharacterView>), ApiError> {
    let created = app
        .use_cases
        .character
        .create
        .execute(
            &user.username,
            &req.name,
            &req.character_class,
            req.color.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn get_character(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<CharacterView>, ApiError> {
    let character = app
        .use_cases
        .character
        .roster
        .get(&user.username, &name)
        .await?;
    Ok(Json(character.into()))
}

async fn get_character_gold(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<GoldResponse>, ApiError> {
    let character = app
        .use_cases
        .character
        .roster
        .get(&user.username, &name)
        .await?;
    Ok(Json(GoldResponse {
        gold: character.gold,
    }))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    app.use_cases
        .character
        .roster
        .delete(&user.username, &name)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Character '{name}' deleted"
    ))))
}

// =============================================================================
// Shop
// =============================================================================

async fn list_shop_items(State(app): State<Arc<App>>, _user: AuthUser) -> Json<Vec<ShopItemView>> {
    Json(
        app.use_cases
            .shop
            .items
            .all()
            .iter()
            .map(ShopItemView::from)
            .collect(),
    )
}

async fn buy_item(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Json(req): Json<TradeRequest>,
) -> Result<Json<BuyResponse>, ApiError> {
    let purchase = app
        .use_cases
        .shop
        .buy
        .execute(
            &user.username,
            &req.character_name,
            &req.item_name,
            req.quantity,
        )
        .await?;
    Ok(Json(BuyResponse {
        message: format!(
            "Bought {}x {} for {} gold",
            purchase.quantity, purchase.item_name, purchase.cost
        ),
        gold_remaining: purchase.gold_remaining,
        item_quantity: purchase.item_quantity,
    }))
}

async fn sell_item(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Json(req): Json<TradeRequest>,
) -> Result<Json<SellResponse>, ApiError> {
    let sale = app
        .use_cases
        .shop
        .sell
        .execute(
            &user.username,
            &req.character_name,
            &req.item_name,
            req.quantity,
        )
        .await?;
    Ok(Json(SellResponse {
        message: format!(
            "Sold {}x {} for {} gold",
            sale.quantity, sale.item_name, sale.gold_earned
        ),
        gold_earned: sale.gold_earned,
        total_gold: sale.total_gold,
    }))
}

// =============================================================================
// Missions
// =============================================================================

async fn list_missions(State(app): State<Arc<App>>, _user: AuthUser) -> Json<MissionListResponse> {
    Json(MissionListResponse {
        missions: app
            .use_cases
            .mission
            .catalog
            .summaries()
            .into_iter()
            .map(MissionSummaryView::from)
            .collect(),
    })
}

async fn get_mission(
    State(app): State<Arc<App>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MissionSummaryView>, ApiError> {
    let summary = app
        .use_cases
        .mission
        .catalog
        .summary(&id)
        .ok_or_else(|| ApiError::NotFound("Mission not found".to_string()))?;
    Ok(Json(summary.into()))
}

async fn start_mission(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Json(req): Json<StartMissionRequest>,
) -> Result<Json<StartMissionResponse>, ApiError> {
    let started = app
        .use_cases
        .mission
        .start
        .execute(&user.username, &req.character_name, &req.mission_id)
        .await?;
    let mission = &started.progress.mission;

    Ok(Json(StartMissionResponse {
        success: true,
        message: format!("Mission '{}' started!", mission.name),
        mission_info: MissionInfoView::from(mission),
        current_room: RoomView::from(&started.room),
        character_status: started.status.into(),
    }))
}

async fn mission_action(
    State(app): State<Arc<App>>,
    user: AuthUser,
    Json(req): Json<MissionActionRequest>,
) -> Result<Json<MissionActionResponse>, ApiError> {
    let result = app
        .use_cases
        .mission
        .action
        .execute(
            &user.username,
            &req.character_name,
            &req.mission_id,
            &req.action,
            req.target.as_deref(),
        )
        .await?;

    Ok(Json(MissionActionResponse {
        success: true,
        message: result.message(),
        current_room: RoomView::from(&result.room),
        character_status: result.status.into(),
        mission_progress: result.counters.into(),
        rewards: result.rewards().cloned().map(RewardsView::from),
    }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<MissionError> for ApiError {
    fn from(e: MissionError) -> Self {
        match e {
            MissionError::CharacterNotFound(_)
            | MissionError::MissionNotFound(_)
            | MissionError::NotStarted => ApiError::NotFound(e.to_string()),
            MissionError::LevelTooLow { .. } => ApiError::BadRequest(e.to_string()),
            MissionError::Rule(MissionRuleError::UnknownRoom(_)) => {
                ApiError::Internal(e.to_string())
            }
            MissionError::Rule(rule) => ApiError::BadRequest(rule.to_string()),
            MissionError::Repo(repo) => repo.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(_) | AuthError::UsernameTaken(_) => {
                ApiError::BadRequest(e.to_string())
            }
            AuthError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            AuthError::Password(_) => ApiError::Internal(e.to_string()),
            AuthError::Repo(repo) => repo.into(),
        }
    }
}

impl From<CharacterError> for ApiError {
    fn from(e: CharacterError) -> Self {
        match e {
            CharacterError::Validation(_)
            | CharacterError::NameTaken(_)
            | CharacterError::LimitReached { .. } => ApiError::BadRequest(e.to_string()),
            CharacterError::NotFound(_) => ApiError::NotFound(e.to_string()),
            CharacterError::Repo(repo) => repo.into(),
        }
    }
}

impl From<ShopError> for ApiError {
    fn from(e: ShopError) -> Self {
        match e {
            ShopError::InvalidQuantity
            | ShopError::InsufficientGold { .. }
            | ShopError::NotEnoughItems { .. } => ApiError::BadRequest(e.to_string()),
            ShopError::ItemNotFound(_) | ShopError::CharacterNotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            ShopError::Repo(repo) => repo.into(),
        }
    }
}
