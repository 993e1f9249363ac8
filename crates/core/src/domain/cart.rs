use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// In-progress selection keyed by product id. A line never holds a zero quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product.id == product_id)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.product.id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// Merges into the existing line for the product, or appends a new line.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::invalid_quantity(&product.id, quantity));
        }

        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
            }
            None => self.items.push(CartItem { product, quantity }),
        }
        Ok(())
    }

    /// Applies `delta` to a line; lines that drop to zero or below are removed.
    pub fn adjust_quantity(&mut self, product_id: &ProductId, delta: i64) {
        let Some(position) = self.items.iter().position(|item| &item.product.id == product_id)
        else {
            return;
        };

        let next = i64::from(self.items[position].quantity).saturating_add(delta);
        if next <= 0 {
            self.items.remove(position);
        } else {
            self.items[position].quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartItem> {
        let position = self.items.iter().position(|item| &item.product.id == product_id)?;
        Some(self.items.remove(position))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
