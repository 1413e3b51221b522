//! Data models for the FlexDoc client
//!
//! Wire types mirror the backend's JSON shapes exactly (snake_case fields,
//! `_id` for server-assigned object ids); everything else is client-local
//! state such as the upload-progress slot.

mod conversion;
mod file;
mod progress;
mod user;

// Re-export all models for convenient imports
pub use conversion::*;
pub use file::*;
pub use progress::*;
pub use user::*;
