//! Local basket state and its cookie persistence.

mod error;
mod models;
mod state;

pub use error::BasketError;
pub use models::LineItem;
pub use state::{Basket, BASKET_ITEMS_COOKIE, BASKET_TOTAL_COOKIE};
