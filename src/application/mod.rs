//! Application services layer.

pub mod error;
pub mod listing;
pub mod pagination;
pub mod posts;
pub mod registry;
pub mod source;
pub mod stream;
