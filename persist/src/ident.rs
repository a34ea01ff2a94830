//! Storage path identifiers.

pub use uuid::Uuid;

/// Unique identifier allocator interface.
pub trait PathAllocator: Send + Sync {
    /// Generate a fresh collision-resistant identifier.
    fn new_identifier(&self) -> Uuid;
}

/// Random (v4) UUID allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidAllocator;

impl PathAllocator for UuidAllocator {
    #[inline]
    fn new_identifier(&self) -> Uuid {
        Uuid::new_v4()
    }
}
