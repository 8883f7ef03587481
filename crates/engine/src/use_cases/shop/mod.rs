//! Shop use cases.
//!
//! Gold and inventory move together in a single ledger update, so a trade
//! either happens completely or not at all.

mod buy;
mod sell;

pub use buy::{BuyItem, Purchase};
pub use sell::{Sale, SellItem};

use std::sync::Arc;

use crate::infrastructure::catalog::ItemCatalog;
use crate::infrastructure::ports::RepoError;

/// Container for shop use cases.
pub struct ShopUseCases {
    pub items: Arc<ItemCatalog>,
    pub buy: Arc<BuyItem>,
    pub sell: Arc<SellItem>,
}

impl ShopUseCases {
    pub fn new(items: Arc<ItemCatalog>, buy: Arc<BuyItem>, sell: Arc<SellItem>) -> Self {
        Self { items, buy, sell }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Item '{0}' not found in the shop")]
    ItemNotFound(String),
    #[error("Character '{0}' not found")]
    CharacterNotFound(String),
    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: i64, available: i64 },
    #[error("Not enough '{item}' to sell: have {available}")]
    NotEnoughItems { item: String, available: i64 },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
