//! Lock-on targeting for STARFALL.
//!
//! Candidate scoring and the NO_TARGET / SEARCHING / LOCKED / FIRING state
//! machine. Generic over the handle type used to name targets, so it has no
//! ECS dependency and can be driven from plain data in tests.

pub mod fsm;
pub mod scoring;

pub use starfall_core as core;

#[cfg(test)]
mod tests;
