//! Repository trait for shortcode records.

use crate::domain::entities::{NewShortcodeRecord, ShortcodeRecord};
use crate::domain::errors::RegistryError;

/// Repository interface for the shortcode → record mapping.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::InMemoryStore`] - sharded in-memory map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LinkRepository: Send + Sync {
    /// Inserts a record if its shortcode is free.
    ///
    /// The uniqueness check and the insert are one atomic step, and the
    /// record's zero-click statistics entry becomes visible together with it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ShortcodeTaken`] if the shortcode already exists.
    fn insert(&self, new_record: NewShortcodeRecord) -> Result<ShortcodeRecord, RegistryError>;

    /// Finds a record by shortcode, expired or not.
    fn find_by_shortcode(&self, shortcode: &str) -> Option<ShortcodeRecord>;

    /// Returns true if a record exists for the shortcode.
    fn exists(&self, shortcode: &str) -> bool;

    /// Number of records ever registered.
    fn count(&self) -> usize;

    /// Number of records whose shortcode is exactly `length` characters long.
    fn count_with_length(&self, length: usize) -> usize;
}
