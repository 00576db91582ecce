//! STARFALL headless host.
//!
//! Loads configuration, runs the simulation engine on a fixed-rate thread
//! and wires file-backed progress stores into it.

pub mod config;
pub mod game_loop;
pub mod headless;
pub mod state;

pub use starfall_core as core;
