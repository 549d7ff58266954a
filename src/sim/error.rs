//! Simulation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// An append-only store ran out of slots
    #[error("{store} store is full (capacity {capacity})")]
    CapacityExceeded { store: &'static str, capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
