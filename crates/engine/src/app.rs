//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::{
    catalog::{ItemCatalog, MissionCatalog},
    clock::SystemClock,
    memory::{InMemoryAccountRepo, InMemoryCharacterRepo},
    password::Argon2Hasher,
    ports::{AccountRepo, CharacterRepo, ClockPort, PasswordHasherPort, RandomPort},
};
use crate::stores::{ProgressStore, SystemRandom, TokenStore};
use crate::use_cases::{
    auth::{Login, Logout, Register},
    character::{CharacterRoster, CreateCharacter},
    mission::{PerformAction, StartMission},
    shop::{BuyItem, SellItem},
    AuthUseCases, CharacterUseCases, MissionUseCases, ShopUseCases,
};

/// Main application state.
///
/// Holds all repositories, stores and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub stores: Stores,
    pub use_cases: UseCases,
}

/// Container for the storage ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub account: Arc<dyn AccountRepo>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            character: Arc::new(InMemoryCharacterRepo::new()),
            account: Arc::new(InMemoryAccountRepo::new()),
        }
    }
}

/// Runtime state that lives only as long as the process.
pub struct Stores {
    pub progress: Arc<ProgressStore>,
    pub tokens: Arc<TokenStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub auth: AuthUseCases,
    pub character: CharacterUseCases,
    pub mission: MissionUseCases,
    pub shop: ShopUseCases,
}

/// Everything `App::new` needs besides the repositories.
pub struct AppParts {
    pub missions: MissionCatalog,
    pub items: ItemCatalog,
    pub token_ttl: Duration,
    pub clock: Arc<dyn ClockPort>,
    pub random: Arc<dyn RandomPort>,
    pub hasher: Arc<dyn PasswordHasherPort>,
}

impl AppParts {
    /// Real clock, randomness and Argon2id hashing.
    pub fn system(missions: MissionCatalog, items: ItemCatalog, token_ttl: Duration) -> Self {
        Self {
            missions,
            items,
            token_ttl,
            clock: Arc::new(SystemClock),
            random: Arc::new(SystemRandom),
            hasher: Arc::new(Argon2Hasher::new()),
        }
    }
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repositories: Repositories, parts: AppParts) -> Self {
        let AppParts {
            missions,
            items,
            token_ttl,
            clock,
            random,
            hasher,
        } = parts;

        let missions = Arc::new(missions);
        let items = Arc::new(items);
        let character_repo = repositories.character.clone();
        let account_repo = repositories.account.clone();

        let stores = Stores {
            progress: Arc::new(ProgressStore::new()),
            tokens: Arc::new(TokenStore::new(token_ttl, random)),
        };

        let auth = AuthUseCases::new(
            Arc::new(Register::new(
                account_repo.clone(),
                hasher.clone(),
                clock.clone(),
            )),
            Arc::new(Login::new(account_repo, hasher, stores.tokens.clone())),
            Arc::new(Logout::new(stores.tokens.clone())),
            stores.tokens.clone(),
        );

        let character = CharacterUseCases::new(
            Arc::new(CreateCharacter::new(
                character_repo.clone(),
                items.clone(),
                clock,
            )),
            Arc::new(CharacterRoster::new(
                character_repo.clone(),
                stores.progress.clone(),
            )),
        );

        let mission = MissionUseCases::new(
            missions.clone(),
            Arc::new(StartMission::new(
                character_repo.clone(),
                missions,
                stores.progress.clone(),
            )),
            Arc::new(PerformAction::new(
                character_repo.clone(),
                stores.progress.clone(),
            )),
        );

        let shop = ShopUseCases::new(
            items.clone(),
            Arc::new(BuyItem::new(character_repo.clone(), items.clone())),
            Arc::new(SellItem::new(character_repo, items)),
        );

        Self {
            repositories,
            stores,
            use_cases: UseCases {
                auth,
                character,
                mission,
                shop,
            },
        }
    }
}
