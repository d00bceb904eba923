//! Core vector abstraction trait

use crate::error::Result;

/// Shared read/write contract every vector representation satisfies
pub trait VectorBase {
    /// Number of logical components
    fn dimensionality(&self) -> usize;

    /// Bounds-checked component read
    fn get(&self, index: usize) -> Result<f64>;

    /// Bounds-checked component write
    fn set(&mut self, index: usize, value: f64) -> Result<()>;

    /// Number of components the backing storage actually holds
    fn entry_count(&self) -> usize;

    /// Whether the backing storage exploits sparsity
    fn is_sparse(&self) -> bool;
}
