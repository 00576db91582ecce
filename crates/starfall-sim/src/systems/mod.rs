//! Systems that run once per tick.
//!
//! Systems are free functions over the engine's state. They do not own
//! state of their own beyond small schedulers passed in by the engine.

pub mod collision;
pub mod enemies;
pub mod snapshot;
pub mod spawner;
pub mod sync;
pub mod targeting;
