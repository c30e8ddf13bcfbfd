//! Shopping cart held in a [`StateContainer`].

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::store::StateContainer;

/// A catalogue item as the cart sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in XAF.
    pub unit_price: u64,
    /// Units on hand when the product was added; not enforced by the cart.
    pub in_stock: u32,
}

/// One cart line: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product
            .unit_price
            .saturating_mul(u64::from(self.quantity))
    }
}

/// Cart contents in insertion order, one line per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of line totals in XAF, before shipping.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.line_total()))
    }
}

/// Cloneable handle to a cart. Clones share the same cart.
#[derive(Clone, Default)]
pub struct CartStore {
    state: StateContainer<Cart>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product`, merging with an existing line for
    /// the same product id. Adding zero units is a no-op.
    pub fn add_item(&self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.state.update(|cart| {
            if let Some(item) = cart.items.iter_mut().find(|i| i.product.id == product.id) {
                item.quantity = item.quantity.saturating_add(quantity);
            } else {
                cart.items.push(CartItem { product, quantity });
            }
        });
        tracing::debug!(count = self.count(), "cart updated");
    }

    /// Returns `true` if a line was removed.
    pub fn remove_item(&self, product_id: &str) -> bool {
        self.state.update_if(|cart| {
            let before = cart.items.len();
            cart.items.retain(|i| i.product.id != product_id);
            cart.items.len() != before
        })
    }

    /// Sets the quantity of an existing line; zero removes it. Returns `false`
    /// if the product is not in the cart.
    pub fn update_quantity(&self, product_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(product_id);
        }
        self.state.update_if(|cart| {
            match cart.items.iter_mut().find(|i| i.product.id == product_id) {
                Some(item) => {
                    item.quantity = quantity;
                    true
                }
                None => false,
            }
        })
    }

    /// Empties the cart. Subscribers are not notified if it was already empty.
    pub fn clear(&self) {
        self.state.update_if(|cart| {
            if cart.items.is_empty() {
                return false;
            }
            cart.items.clear();
            true
        });
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.state.read(Cart::count)
    }

    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.state.read(Cart::subtotal)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read(Cart::is_empty)
    }

    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.state.read(|cart| cart.items.clone())
    }

    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.state.get()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }
}
