use thiserror::Error;

/// Error during local basket operations.
#[derive(Debug, Error)]
pub enum BasketError {
    /// The `basket_items` cookie held something that is not a line-item array.
    #[error("Malformed basket cookie: {0}")]
    Parse(#[from] serde_json::Error),

    /// A mutation addressed a product id that is not in the basket.
    #[error("Product {0} is not in the basket")]
    UnknownProduct(u32),

    /// Decrement below zero.
    #[error("Product {0} already has quantity 0")]
    InvalidQuantity(u32),
}
