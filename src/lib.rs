//! Retro8 - turn images into 8-bit style pixel art
//!
//! PNG collaborator layer around `retro-quant`: configuration, codec,
//! HTTP service and CLI support.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
