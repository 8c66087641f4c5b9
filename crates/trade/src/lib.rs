pub mod bot;
pub mod cli;
pub mod error;
pub mod logger;
pub mod order;

pub use bot::{sanitize_for_logging, BasicBot, PlaceOrderOptions};
pub use error::OrderError;
pub use order::OrderRequest;
