pub mod decks;
pub mod error;
pub mod json_bridge;
pub mod schema;
pub mod store;

pub use decks::DeckStore;
pub use error::{Result, StoreError};
pub use store::Store;
