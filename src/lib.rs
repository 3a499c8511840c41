//! Server-rendered post board backed by an upstream posts API.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
