//! Sell item use case. The shop pays half the list price.

use std::sync::Arc;

use midian_domain::{CharacterField, CharacterUpdate};

use crate::infrastructure::catalog::ItemCatalog;
use crate::infrastructure::ports::CharacterRepo;

use super::ShopError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub item_name: String,
    pub quantity: i64,
    pub gold_earned: i64,
    pub total_gold: i64,
}

pub struct SellItem {
    characters: Arc<dyn CharacterRepo>,
    items: Arc<ItemCatalog>,
}

impl SellItem {
    pub fn new(characters: Arc<dyn CharacterRepo>, items: Arc<ItemCatalog>) -> Self {
        Self { characters, items }
    }

    pub async fn execute(
        &self,
        owner: &str,
        character_name: &str,
        item_name: &str,
        quantity: i64,
    ) -> Result<Sale, ShopError> {
        if quantity < 1 {
            return Err(ShopError::InvalidQuantity);
        }
        let item = self
            .items
            .get(item_name)
            .ok_or_else(|| ShopError::ItemNotFound(item_name.to_string()))?;
        let earned = item
            .sell_price()
            .checked_mul(quantity)
            .ok_or(ShopError::InvalidQuantity)?;

        let character = self
            .characters
            .get(owner, character_name)
            .await?
            .ok_or_else(|| ShopError::CharacterNotFound(character_name.to_string()))?;
        let owned = character.item_quantity(&item.name);
        if owned < quantity {
            return Err(ShopError::NotEnoughItems {
                item: item.name.clone(),
                available: owned,
            });
        }

        let update = CharacterUpdate::new()
            .add(CharacterField::Item(item.name.clone()), -quantity)
            .add(CharacterField::Gold, earned);

        let updated = match self.characters.update(owner, character_name, update).await {
            Ok(updated) => updated,
            Err(e) if e.is_constraint() => {
                let available = self
                    .characters
                    .get(owner, character_name)
                    .await?
                    .map(|c| c.item_quantity(&item.name))
                    .unwrap_or_default();
                return Err(ShopError::NotEnoughItems {
                    item: item.name.clone(),
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
            earned,
            "Item sold"
        );

        Ok(Sale {
            item_name: item.name.clone(),
            quantity,
            gold_earned: earned,
            total_gold: updated.gold,
        })
    }
}

#[cfg(test)]
mod tests {
    use midian_domain::CharacterClass;

    use super::*;
    use crate::test_fixtures::{character, items, ledger_with, OWNER};

    #[tokio::test]
    async fn selling_pays_half_price_and_removes_items() {
        let ledger = ledger_with(vec![
            character("Lia", CharacterClass::Assassino).with_item("Adagas Gêmeas", 1)
        ])
        .await;
        let sell = SellItem::new(ledger.clone(), items());

        let sale = sell
            .execute(OWNER, "Lia", "Adagas Gêmeas", 1)
            .await
            .unwrap();

        assert_eq!(sale.gold_earned, 150);
        assert_eq!(sale.total_gold, 250);
        let stored = ledger.get(OWNER, "Lia").await.unwrap().unwrap();
        assert!(!stored.itens.contains_key("Adagas Gêmeas"));
    }

    #[tokio::test]
    async fn odd_prices_round_down() {
        let ledger = ledger_with(vec![
            character("Lia", CharacterClass::Mago).with_item("Poção de Cura", 5)
        ])
        .await;
        let sell = SellItem::new(ledger.clone(), items());

        let sale = sell.execute(OWNER, "Lia", "Poção de Cura", 3).await.unwrap();

        assert_eq!(sale.gold_earned, 75);
        let stored = ledger.get(OWNER, "Lia").await.unwrap().unwrap();
        assert_eq!(stored.item_quantity("Poção de Cura"), 2);
    }

    #[tokio::test]
    async fn selling_more_than_owned_changes_nothing() {
        let ledger = ledger_with(vec![
            character("Lia", CharacterClass::Mago).with_item("Fuga", 1)
        ])
        .await;
        let sell = SellItem::new(ledger.clone(), items());

        let result = sell.execute(OWNER, "Lia", "Fuga", 2).await;

        assert!(matches!(
            result,
            Err(ShopError::NotEnoughItems { available: 1, .. })
        ));
        let stored = ledger.get(OWNER, "Lia").await.unwrap().unwrap();
        assert_eq!(stored.item_quantity("Fuga"), 1);
        assert_eq!(stored.gold, 100);
    }

    #[tokio::test]
    async fn unowned_item_is_not_enough_items() {
        let ledger = ledger_with(vec![character("Lia", CharacterClass::Mago)]).await;
        let sell = SellItem::new(ledger, items());

        let result = sell.execute(OWNER, "Lia", "Elixir de Força", 1).await;

        assert!(matches!(
            result,
            Err(ShopError::NotEnoughItems { available: 0, .. })
        ));
    }
}
