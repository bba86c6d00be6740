//! Shared types for consistent API responses.

mod response;

pub use response::MessageResponse;
