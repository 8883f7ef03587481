//! Buy item use case.

use std::sync::Arc;

use midian_domain::{CharacterField, CharacterUpdate};

use crate::infrastructure::catalog::ItemCatalog;
use crate::infrastructure::ports::CharacterRepo;

use super::ShopError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub item_name: String,
    pub quantity: i64,
    pub cost: i64,
    pub gold_remaining: i64,
    /// How many the character owns after the purchase.
    pub item_quantity: i64,
}

pub struct BuyItem {
    characters: Arc<dyn CharacterRepo>,
    items: Arc<ItemCatalog>,
}

impl BuyItem {
    pub fn new(characters: Arc<dyn CharacterRepo>, items: Arc<ItemCatalog>) -> Self {
        Self { characters, items }
    }

    pub async fn execute(
        &self,
        owner: &str,
        character_name: &str,
        item_name: &str,
        quantity: i64,
    ) -> Result<Purchase, ShopError> {
        if quantity < 1 {
            return Err(ShopError::InvalidQuantity);
        }
        let item = self
            .items
            .get(item_name)
            .ok_or_else(|| ShopError::ItemNotFound(item_name.to_string()))?;
        let cost = item
            .price
            .checked_mul(quantity)
            .ok_or(ShopError::InvalidQuantity)?;

        let character = self
            .characters
            .get(owner, character_name)
            .await?
            .ok_or_else(|| ShopError::CharacterNotFound(character_name.to_string()))?;
        if character.gold < cost {
            return Err(ShopError::InsufficientGold {
                needed: cost,
                available: character.gold,
            });
        }

        let update = CharacterUpdate::new()
            .add(CharacterField::Gold, -cost)
            .add(CharacterField::Item(item.name.clone()), quantity);

        // The ledger re-checks gold under its own lock; a concurrent spend
        // surfaces here as a constraint violation.
        let updated = match self.characters.update(owner, character_name, update).await {
            Ok(updated) => updated,
            Err(e) if e.is_constraint() => {
                let available = self
                    .characters
                    .get(owner, character_name)
                    .await?
                    .map(|c| c.gold)
                    .unwrap_or_default();
                return Err(ShopError::InsufficientGold {
                    needed: cost,
                    available,
                });
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            owner = %owner,
            character = %character_name,
            item = %item.name,
            quantity,
            cost,
            "Item bought"
        );

        Ok(Purchase {
            item_name: item.name.clone(),
            quantity,
            cost,
            gold_remaining: updated.gold,
            item_quantity: updated.item_quantity(&item.name),
        })
    }
}
