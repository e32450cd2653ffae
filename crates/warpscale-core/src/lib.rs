pub mod config;
pub mod error;
pub mod quantity;
pub mod types;

pub use config::HpaDocument;
pub use error::{ConfigError, QuantityError};
pub use quantity::Quantity;
pub use types::*;
