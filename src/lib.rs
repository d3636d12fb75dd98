//! Library crate for gameshow-store, exposing the state store and its services.

/// Runtime configuration loading.
pub mod config;
/// Persistence: key-value backends and the snapshot repository.
pub mod dao;
/// Input payloads and read-only aggregates.
pub mod dto;
/// Error types returned by the services.
pub mod error;
/// Operations on a gameshow, grouped by role.
pub mod services;
/// In-memory gameshow state and its models.
pub mod state;
