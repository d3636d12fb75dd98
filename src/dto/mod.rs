/// Read-only aggregates for spectator and admin views.
pub mod display;
/// Question creation and update payloads.
pub mod question;
/// Validation helpers for DTOs.
pub mod validation;
