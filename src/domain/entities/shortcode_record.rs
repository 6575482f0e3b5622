//! Shortcode record entity: the mapping from a shortcode to its original URL.

use chrono::{DateTime, Utc};

/// A registered shortcode with its destination and lifetime.
///
/// Records are never removed. Expiry is a computed property, so an expired
/// record still backs statistics while refusing redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeRecord {
    /// Creation order within the process, used for stable listing.
    pub sequence: u64,
    pub shortcode: String,
    pub original_url: String,
    pub short_link: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ShortcodeRecord {
    /// Returns true when `now` is strictly after the expiry timestamp.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Input data for registering a new shortcode.
///
/// The store assigns the creation sequence on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortcodeRecord {
    pub shortcode: String,
    pub original_url: String,
    pub short_link: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewShortcodeRecord {
    pub fn into_record(self, sequence: u64) -> ShortcodeRecord {
        ShortcodeRecord {
            sequence,
            shortcode: self.shortcode,
            original_url: self.original_url,
            short_link: self.short_link,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
