//! Reconciliation between local basket state and the server basket.
//!
//! The remote call goes out first; local state and the cookies only change
//! once the server confirms the mutation. On any failure the local basket
//! is left exactly as it was.

use thiserror::Error;

use crate::basket::{Basket, BasketError, LineItem};
use crate::remote::{BasketClient, RemoteBasket, RemoteError};

/// Tolerance when comparing the server total against the local recomputation.
const TOTAL_DRIFT_EPSILON: f64 = 0.005;

/// Error during a server-confirmed basket mutation.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Basket(#[from] BasketError),
}

/// A basket whose mutations are committed only on server confirmation.
pub struct SyncedBasket {
    basket: Basket,
    client: BasketClient,
}

impl SyncedBasket {
    pub fn new(basket: Basket, client: BasketClient) -> Self {
        Self { basket, client }
    }

    /// The local, server-confirmed view.
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn into_basket(self) -> Basket {
        self.basket
    }

    /// Add one unit of the product; commits locally only once the server
    /// confirms. Catalog metadata seeds the line item on first sight.
    pub async fn add(&mut self, id: u32, name: &str, unit_price: f64) -> Result<(), SyncError> {
        let confirmed = self.client.add_product(id).await?;
        self.apply(confirmed, Some((id, name, unit_price)));
        Ok(())
    }

    /// Remove one unit of the product; commits locally only once the
    /// server confirms.
    pub async fn remove(&mut self, id: u32) -> Result<(), SyncError> {
        let confirmed = self.client.remove_product(id).await?;
        self.apply(confirmed, None);
        Ok(())
    }

    /// Empty both baskets, server first.
    pub async fn clear(&mut self) -> Result<(), SyncError> {
        self.client.clear_basket().await?;
        self.basket.clear();
        Ok(())
    }

    /// Commit server-confirmed quantities into local state.
    ///
    /// Server quantities win; local display metadata (name, unit price) is
    /// kept. A line the server no longer reports drops to quantity zero
    /// but stays listed. A server product with no local metadata cannot be
    /// rendered and is skipped.
    fn apply(&mut self, confirmed: RemoteBasket, catalog: Option<(u32, &str, f64)>) {
        let mut items: Vec<LineItem> = self.basket.items().to_vec();
        if let Some((id, name, unit_price)) = catalog {
            if !items.iter().any(|item| item.id == id) {
                items.push(LineItem::new(id, name, unit_price));
            }
        }

        for item in &mut items {
            item.quantity = confirmed
                .items
                .iter()
                .find(|remote| remote.product_id == item.id)
                .map(|remote| remote.quantity)
                .unwrap_or(0);
        }

        for remote in &confirmed.items {
            if !items.iter().any(|item| item.id == remote.product_id) {
                tracing::warn!(
                    product_id = remote.product_id,
                    quantity = remote.quantity,
                    "Server basket holds a product with no local metadata; skipping"
                );
            }
        }

        let local_total: f64 = items.iter().map(LineItem::subtotal).sum();
        if (local_total - confirmed.total).abs() > TOTAL_DRIFT_EPSILON {
            tracing::warn!(
                local = local_total,
                server = confirmed.total,
                "Basket total drift; persisting the local recomputation"
            );
        }

        self.basket.commit_items(items);
    }
}
