pub mod basket;
pub mod config;
pub mod cookie;
pub mod remote;
pub mod sync;

pub use basket::{Basket, BasketError, LineItem, BASKET_ITEMS_COOKIE, BASKET_TOTAL_COOKIE};
pub use config::{Config, ConfigError};
pub use cookie::{read_cookie, write_cookie, CookieJar, FileJar, MemoryJar};
pub use remote::{BasketClient, RemoteBasket, RemoteError, RemoteItem, CSRF_COOKIE};
pub use sync::{SyncError, SyncedBasket};
