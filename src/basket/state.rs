//! In-memory basket state synchronized to cookie storage.
//!
//! The basket mirrors the page's view state: every mutation rewrites the
//! `basket_items` and `basket_total` cookies, so the next page load (or
//! CLI invocation) starts from the same contents.

use crate::cookie::{write_cookie, CookieJar};

use super::error::BasketError;
use super::models::LineItem;

/// Cookie holding the JSON array of line items.
pub const BASKET_ITEMS_COOKIE: &str = "basket_items";

/// Cookie holding the JSON-encoded basket total.
pub const BASKET_TOTAL_COOKIE: &str = "basket_total";

/// Basket cookies survive an hour.
const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 3600;

/// The ordered basket for the current session.
///
/// Created once per session via [`Basket::initialize`]; the jar and the
/// optional starting snapshot are explicit dependencies rather than
/// ambient lookups.
pub struct Basket {
    items: Vec<LineItem>,
    jar: Box<dyn CookieJar>,
    cookie_max_age: u64,
}

impl Basket {
    /// Build the starting state.
    ///
    /// A non-empty `starting_items` snapshot wins verbatim; otherwise the
    /// `basket_items` cookie is consulted, and a malformed cookie is a
    /// [`BasketError::Parse`] rather than an abort. With neither source,
    /// the basket starts empty.
    pub fn initialize(
        jar: Box<dyn CookieJar>,
        starting_items: Option<Vec<LineItem>>,
    ) -> Result<Self, BasketError> {
        let items = match starting_items {
            Some(items) if !items.is_empty() => items,
            _ => match jar.get(BASKET_ITEMS_COOKIE) {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Vec::new(),
            },
        };
        Ok(Self {
            items,
            jar,
            cookie_max_age: DEFAULT_COOKIE_MAX_AGE_SECS,
        })
    }

    /// Override the Max-Age applied to the basket cookies.
    pub fn with_cookie_max_age(mut self, max_age_secs: u64) -> Self {
        self.cookie_max_age = max_age_secs;
        self
    }

    /// Line items in insertion order. Zero-quantity items stay listed.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The jar this basket persists through.
    pub fn jar(&self) -> &dyn CookieJar {
        self.jar.as_ref()
    }

    /// Sum of quantity × unit_price over all items.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Increment the quantity of the item with `id` by one, then persist.
    pub fn add(&mut self, id: u32) -> Result<(), BasketError> {
        let item = self.find_mut(id)?;
        item.quantity += 1;
        self.persist();
        Ok(())
    }

    /// Decrement the quantity of the item with `id` by one, then persist.
    ///
    /// Quantity is floored at zero: decrementing an already-empty line is
    /// a [`BasketError::InvalidQuantity`] and leaves state untouched. The
    /// item itself is never removed from the sequence.
    pub fn remove(&mut self, id: u32) -> Result<(), BasketError> {
        let item = self.find_mut(id)?;
        if item.quantity == 0 {
            return Err(BasketError::InvalidQuantity(id));
        }
        item.quantity -= 1;
        self.persist();
        Ok(())
    }

    /// Drop every item, then persist.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Append a fresh quantity-0 line for the product, then `add` it.
    pub fn create_and_add(
        &mut self,
        id: u32,
        name: &str,
        unit_price: f64,
    ) -> Result<(), BasketError> {
        self.items.push(LineItem::new(id, name, unit_price));
        self.add(id)
    }

    /// Catalog-side entry point: add one unit of the product, creating its
    /// line item on first sight.
    pub fn add_from_catalog(
        &mut self,
        id: u32,
        name: &str,
        unit_price: f64,
    ) -> Result<(), BasketError> {
        if self.items.iter().any(|item| item.id == id) {
            self.add(id)
        } else {
            self.create_and_add(id, name, unit_price)
        }
    }

    /// Replace the whole item sequence with server-confirmed state, then
    /// persist. This is the reconciliation commit point.
    pub(crate) fn commit_items(&mut self, items: Vec<LineItem>) {
        self.items = items;
        self.persist();
    }

    /// `Set-Cookie`-style strings for both basket cookies, for embedding
    /// contexts that bridge to a real HTTP response.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(2);
        if let Ok(items) = serde_json::to_string(&self.items) {
            headers.push(write_cookie(BASKET_ITEMS_COOKIE, &items, self.cookie_max_age));
        }
        if let Ok(total) = serde_json::to_string(&self.total()) {
            headers.push(write_cookie(BASKET_TOTAL_COOKIE, &total, self.cookie_max_age));
        }
        headers
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut LineItem, BasketError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(BasketError::UnknownProduct(id))
    }

    /// Rewrite both basket cookies from current state.
    ///
    /// The persisted total is the computed one; encode failures are logged
    /// and swallowed, matching how the browser treats rejected writes.
    fn persist(&mut self) {
        match serde_json::to_string(&self.items) {
            Ok(payload) => self
                .jar
                .set(BASKET_ITEMS_COOKIE, &payload, self.cookie_max_age),
            Err(error) => tracing::warn!(error = %error, "Failed to encode basket items"),
        }
        match serde_json::to_string(&self.total()) {
            Ok(payload) => self
                .jar
                .set(BASKET_TOTAL_COOKIE, &payload, self.cookie_max_age),
            Err(error) => tracing::warn!(error = %error, "Failed to encode basket total"),
        }
    }
}
