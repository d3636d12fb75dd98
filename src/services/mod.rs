/// Destructive administrative operations.
pub mod admin_service;
/// Answer ledger for the open round.
pub mod answer_service;
/// Spectator and dashboard aggregates.
pub mod display_service;
/// Question registry.
pub mod question_service;
/// Round lifecycle.
pub mod round_service;
/// Points and leaderboard.
pub mod scoring_service;
/// Foreign update detection and reconciliation.
pub mod sync_service;
/// Team registry and membership.
pub mod team_service;
