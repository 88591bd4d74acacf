//! Riot API client used by the tracker.
//!
//! The library offers typed wrappers around the summoner, spectator and
//! match REST endpoints, mapping the "no data yet" responses to `None` so
//! the core never has to reason about HTTP statuses.

pub mod api;
pub mod types;
