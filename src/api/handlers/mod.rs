//! HTTP request handlers.

pub mod user_handler;
pub mod wallet_handler;

pub use user_handler::user_routes;
pub use wallet_handler::wallet_routes;
