//! Error types for rejected simulation requests.
//!
//! Rejections never change simulation state; callers log them and move on.

use thiserror::Error;

use crate::enums::FireRejection;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("power {0} outside [0, 1]")]
    InvalidPower(f32),

    #[error("projectile pool exhausted")]
    PoolExhausted,

    #[error("unknown enemy id {0}")]
    UnknownEnemy(u32),

    #[error("enemy {0} is destroyed")]
    EnemyDestroyed(u32),

    #[error("enemy {0} is invulnerable after respawn")]
    EnemyInvulnerable(u32),

    #[error("special weapon fire rejected: {0:?}")]
    FireRejected(FireRejection),
}

pub type SimResult<T> = Result<T, SimError>;
