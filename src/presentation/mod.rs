//! Presentation layer: view models and template rendering.

pub mod listing;
pub mod views;
