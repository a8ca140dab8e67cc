//! ID generator port for producing record identifiers.

/// Generates unique record identifiers.
///
/// These are the opaque document ids of employee records, not the
/// human-readable login ids produced by the allocator.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
