//! Shortcode creation and redirect resolution service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::statistics_tracker::StatisticsTracker;
use crate::domain::clock::Clock;
use crate::domain::entities::{ClickMetadata, NewShortcodeRecord, ShortcodeRecord};
use crate::domain::errors::RegistryError;
use crate::domain::events::{EventSink, RegistryEvent};
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::utils::code_generator::{code_space_size, generate_code, validate_shortcode};
use crate::utils::url_validator::validate_url;

pub const MIN_VALIDITY_MINUTES: i64 = 1;
/// One week.
pub const MAX_VALIDITY_MINUTES: i64 = 10_080;
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Settings the registry needs from configuration.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// Base address short links are built on, e.g. `http://localhost:3001`.
    pub base_url: String,
    /// Length of generated shortcodes.
    pub generated_code_length: usize,
}

/// Result of a successful [`Registry::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub shortcode: String,
    pub short_link: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<ShortcodeRecord> for CreatedLink {
    fn from(record: ShortcodeRecord) -> Self {
        Self {
            shortcode: record.shortcode,
            short_link: record.short_link,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

/// Service owning the shortcode → URL mapping.
///
/// Handles input validation, shortcode allocation with collision retry,
/// expiry enforcement and click recording on redirect.
pub struct Registry<L: LinkRepository, S: StatsRepository> {
    link_repository: Arc<L>,
    tracker: Arc<StatisticsTracker<S>>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
    base_url: String,
    generated_code_length: usize,
}

impl<L: LinkRepository, S: StatsRepository> Registry<L, S> {
    /// Creates a new registry.
    pub fn new(
        link_repository: Arc<L>,
        tracker: Arc<StatisticsTracker<S>>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            link_repository,
            tracker,
            clock,
            events,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            generated_code_length: settings.generated_code_length,
        }
    }

    /// Registers `original_url` under a new shortcode valid for `validity_minutes`.
    ///
    /// Every input is validated before anything is written. The URL is
    /// stored in its parsed form: percent-encoded, ASCII only, with tabs and
    /// newlines stripped, so it is always a valid `Location` header value.
    ///
    /// # Code Allocation
    ///
    /// - A custom shortcode is validated and claimed atomically, or rejected
    ///   if it is already taken
    /// - Otherwise a random code is generated and claimed; collisions are
    ///   retried until a free code is found, giving up only once every code
    ///   of the configured length could be in use
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidUrl`] - not an absolute http(s) URL
    /// - [`RegistryError::InvalidValidity`] - outside 1..=10080 minutes
    /// - [`RegistryError::InvalidShortcode`] - custom code fails the format check
    /// - [`RegistryError::ShortcodeTaken`] - custom code already registered
    /// - [`RegistryError::CodeSpaceExhausted`] - no generated code can be free
    pub fn create(
        &self,
        original_url: &str,
        validity_minutes: i64,
        custom_shortcode: Option<&str>,
    ) -> Result<CreatedLink, RegistryError> {
        let original_url = validate_url(original_url)
            .map_err(|e| RegistryError::InvalidUrl {
                reason: e.to_string(),
            })?
            .to_string();

        if !(MIN_VALIDITY_MINUTES..=MAX_VALIDITY_MINUTES).contains(&validity_minutes) {
            return Err(RegistryError::InvalidValidity {
                provided: validity_minutes,
                min: MIN_VALIDITY_MINUTES,
                max: MAX_VALIDITY_MINUTES,
            });
        }

        if let Some(code) = custom_shortcode {
            validate_shortcode(code)?;
        }

        let created_at = self.clock.now();
        let expires_at = created_at + Duration::minutes(validity_minutes);

        let record = match custom_shortcode {
            Some(code) => self.link_repository.insert(self.new_record(
                code,
                &original_url,
                created_at,
                expires_at,
            ))?,
            None => self.insert_generated(&original_url, created_at, expires_at)?,
        };

        self.events.emit(RegistryEvent::Created {
            shortcode: record.shortcode.clone(),
            original_url: record.original_url.clone(),
            expires_at: record.expires_at,
        });

        Ok(record.into())
    }

    /// Resolves a shortcode to its original URL and records the click.
    ///
    /// A failure to record the click is logged and emitted as an event, but
    /// never fails the redirect.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] - shortcode was never registered
    /// - [`RegistryError::Expired`] - current time is past the expiry
    pub fn resolve(
        &self,
        shortcode: &str,
        metadata: ClickMetadata,
    ) -> Result<String, RegistryError> {
        let record = self
            .link_repository
            .find_by_shortcode(shortcode)
            .ok_or_else(|| RegistryError::not_found(shortcode))?;

        if record.is_expired_at(self.clock.now()) {
            self.events.emit(RegistryEvent::RedirectRefused {
                shortcode: record.shortcode.clone(),
                expired_at: record.expires_at,
            });

            return Err(RegistryError::Expired {
                shortcode: record.shortcode,
                expired_at: record.expires_at,
            });
        }

        match self.tracker.record_click(shortcode, metadata) {
            Ok(recorded) => self.events.emit(RegistryEvent::Accessed {
                shortcode: record.shortcode.clone(),
                original_url: record.original_url.clone(),
                click_count: recorded.click_count,
            }),
            Err(e) => {
                let failure = RegistryError::ClickRecordingFailure {
                    shortcode: record.shortcode.clone(),
                    reason: e.to_string(),
                };
                warn!(error = %failure, "Redirect served without recording click");

                self.events.emit(RegistryEvent::ClickRecordingFailed {
                    shortcode: record.shortcode.clone(),
                    reason: e.to_string(),
                });
            }
        }

        Ok(record.original_url)
    }

    /// Returns true if the shortcode was ever registered. No side effects.
    pub fn exists(&self, shortcode: &str) -> bool {
        self.link_repository.exists(shortcode)
    }

    /// Number of registered shortcodes, expired ones included.
    pub fn len(&self) -> usize {
        self.link_repository.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds the public short link for a shortcode.
    pub fn short_link(&self, shortcode: &str) -> String {
        format!("{}/{}", self.base_url, shortcode)
    }

    fn new_record(
        &self,
        shortcode: &str,
        original_url: &str,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> NewShortcodeRecord {
        NewShortcodeRecord {
            shortcode: shortcode.to_string(),
            original_url: original_url.to_string(),
            short_link: self.short_link(shortcode),
            created_at,
            expires_at,
        }
    }

    /// Claims a random code, retrying on collision.
    ///
    /// The claim itself is the repository's atomic insert, so two concurrent
    /// generators can never both win the same code.
    fn insert_generated(
        &self,
        original_url: &str,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<ShortcodeRecord, RegistryError> {
        let length = self.generated_code_length;
        let space = code_space_size(length);
        let mut attempts: u64 = 0;

        loop {
            let code = generate_code(length);
            attempts += 1;

            match self
                .link_repository
                .insert(self.new_record(&code, original_url, created_at, expires_at))
            {
                Ok(record) => {
                    if attempts > 1 {
                        debug!(
                            shortcode = %record.shortcode,
                            attempts,
                            "Generated shortcode after collisions"
                        );
                    }
                    return Ok(record);
                }
                Err(RegistryError::ShortcodeTaken { .. }) => {
                    if self.link_repository.count_with_length(length) as u128 >= space {
                        return Err(RegistryError::CodeSpaceExhausted { length });
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::entities::ClickEvent;
    use crate::domain::events::{MockEventSink, NullEventSink};
    use crate::domain::repositories::{MockLinkRepository, MockStatsRepository, RecordedClick};
    use crate::utils::code_generator::is_valid_shortcode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE_URL: &str = "http://localhost:3001";

    fn settings(length: usize) -> RegistrySettings {
        RegistrySettings {
            base_url: format!("{}/", BASE_URL),
            generated_code_length: length,
        }
    }

    fn registry(
        links: MockLinkRepository,
        stats: MockStatsRepository,
        clock: Arc<ManualClock>,
        events: Arc<dyn EventSink>,
    ) -> Registry<MockLinkRepository, MockStatsRepository> {
        let tracker = Arc::new(StatisticsTracker::new(
            Arc::new(stats),
            clock.clone(),
            events.clone(),
        ));
        Registry::new(Arc::new(links), tracker, clock, events, settings(8))
    }

    fn stored(new_record: NewShortcodeRecord) -> Result<ShortcodeRecord, RegistryError> {
        Ok(new_record.into_record(0))
    }

    fn live_record(code: &str, url: &str, clock: &ManualClock) -> ShortcodeRecord {
        let now = clock.now();
        NewShortcodeRecord {
            shortcode: code.to_string(),
            original_url: url.to_string(),
            short_link: format!("{}/{}", BASE_URL, code),
            created_at: now,
            expires_at: now + Duration::minutes(1),
        }
        .into_record(0)
    }

    #[test]
    fn test_create_with_custom_code() {
        let clock = Arc::new(ManualClock::default());
        let start = clock.now();

        let mut links = MockLinkRepository::new();
        links
            .expect_insert()
            .withf(|new_record| {
                new_record.shortcode == "abc123"
                    && new_record.original_url == "https://example.com/page"
                    && new_record.short_link == "http://localhost:3001/abc123"
            })
            .times(1)
            .returning(stored);

        let mut events = MockEventSink::new();
        events
            .expect_emit()
            .withf(|event| matches!(event, RegistryEvent::Created { shortcode, .. } if shortcode == "abc123"))
            .times(1)
            .return_const(());

        let registry = registry(links, MockStatsRepository::new(), clock, Arc::new(events));

        let created = registry
            .create("https://example.com/page", 1, Some("abc123"))
            .unwrap();

        assert_eq!(created.shortcode, "abc123");
        assert_eq!(created.short_link, "http://localhost:3001/abc123");
        assert_eq!(created.expires_at, start + Duration::minutes(1));
        assert!(created.expires_at > created.created_at);
    }

    #[test]
    fn test_create_stores_parsed_url() {
        let mut links = MockLinkRepository::new();
        links
            .expect_insert()
            .withf(|new_record| new_record.original_url == "https://example.com/a%20bc/caf%C3%A9")
            .times(1)
            .returning(stored);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        let result = registry.create("https://example.com/a b\n\tc/café", 30, Some("enc001"));

        assert!(result.is_ok());
    }

    #[test]
    fn test_create_generates_valid_code() {
        let mut links = MockLinkRepository::new();
        links.expect_insert().times(1).returning(stored);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        let created = registry.create("https://example.com", 30, None).unwrap();

        assert_eq!(created.shortcode.len(), 8);
        assert!(is_valid_shortcode(&created.shortcode));
        assert_eq!(
            created.short_link,
            format!("http://localhost:3001/{}", created.shortcode)
        );
    }

    #[test]
    fn test_create_retries_generated_collisions() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut links = MockLinkRepository::new();
        links.expect_insert().times(3).returning(move |new_record| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(RegistryError::ShortcodeTaken {
                    shortcode: new_record.shortcode,
                })
            } else {
                stored(new_record)
            }
        });
        links
            .expect_count_with_length()
            .withf(|length| *length == 8)
            .times(2)
            .return_const(10usize);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        let result = registry.create("https://example.com", 30, None);

        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_create_reports_exhausted_code_space() {
        let mut links = MockLinkRepository::new();
        links.expect_insert().times(1).returning(|new_record| {
            Err(RegistryError::ShortcodeTaken {
                shortcode: new_record.shortcode,
            })
        });
        links
            .expect_count_with_length()
            .withf(|length| *length == 3)
            .times(1)
            .return_const(code_space_size(3) as usize);

        let clock = Arc::new(ManualClock::default());
        let tracker = Arc::new(StatisticsTracker::new(
            Arc::new(MockStatsRepository::new()),
            clock.clone(),
            Arc::new(NullEventSink),
        ));
        let registry = Registry::new(
            Arc::new(links),
            tracker,
            clock,
            Arc::new(NullEventSink),
            settings(3),
        );

        let result = registry.create("https://example.com", 30, None);

        assert_eq!(result, Err(RegistryError::CodeSpaceExhausted { length: 3 }));
    }

    #[test]
    fn test_create_ignores_codes_of_other_lengths_when_retrying() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut links = MockLinkRepository::new();
        links.expect_insert().times(2).returning(move |new_record| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(RegistryError::ShortcodeTaken {
                    shortcode: new_record.shortcode,
                })
            } else {
                stored(new_record)
            }
        });
        links.expect_count().times(0);
        links
            .expect_count_with_length()
            .withf(|length| *length == 3)
            .times(1)
            .return_const(1usize);

        let clock = Arc::new(ManualClock::default());
        let tracker = Arc::new(StatisticsTracker::new(
            Arc::new(MockStatsRepository::new()),
            clock.clone(),
            Arc::new(NullEventSink),
        ));
        let registry = Registry::new(
            Arc::new(links),
            tracker,
            clock,
            Arc::new(NullEventSink),
            settings(3),
        );

        let created = registry.create("https://example.com", 30, None).unwrap();

        assert_eq!(created.shortcode.len(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_create_invalid_url_writes_nothing() {
        let mut links = MockLinkRepository::new();
        links.expect_insert().times(0);

        let mut events = MockEventSink::new();
        events.expect_emit().times(0);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(events),
        );

        let result = registry.create("not-a-url", 30, None);

        assert!(matches!(result, Err(RegistryError::InvalidUrl { .. })));
    }

    #[test]
    fn test_create_rejects_out_of_range_validity() {
        let mut links = MockLinkRepository::new();
        links.expect_insert().times(0);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        for validity in [0, -5, 10_081] {
            let result = registry.create("https://example.com", validity, None);
            assert!(
                matches!(result, Err(RegistryError::InvalidValidity { provided, .. }) if provided == validity)
            );
        }
    }

    #[test]
    fn test_create_accepts_validity_bounds() {
        let mut links = MockLinkRepository::new();
        links.expect_insert().times(2).returning(stored);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        assert!(registry.create("https://example.com", 1, None).is_ok());
        assert!(registry.create("https://example.com", 10_080, None).is_ok());
    }

    #[test]
    fn test_create_rejects_invalid_custom_code() {
        let mut links = MockLinkRepository::new();
        links.expect_insert().times(0);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        let result = registry.create("https://example.com", 30, Some("no spaces!"));

        assert!(matches!(result, Err(RegistryError::InvalidShortcode { .. })));
    }

    #[test]
    fn test_create_custom_code_taken() {
        let mut links = MockLinkRepository::new();
        links
            .expect_insert()
            .withf(|new_record| new_record.shortcode == "taken1")
            .times(1)
            .returning(|new_record| {
                Err(RegistryError::ShortcodeTaken {
                    shortcode: new_record.shortcode,
                })
            });

        let mut events = MockEventSink::new();
        events.expect_emit().times(0);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(events),
        );

        let result = registry.create("https://example.com", 30, Some("taken1"));

        assert_eq!(
            result,
            Err(RegistryError::ShortcodeTaken {
                shortcode: "taken1".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_records_click() {
        let clock = Arc::new(ManualClock::default());
        let record = live_record("abc123", "https://example.com/page", &clock);

        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_shortcode()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Some(record.clone()));

        let mut stats = MockStatsRepository::new();
        stats
            .expect_record_click()
            .withf(|code, metadata, _| {
                code == "abc123" && metadata.user_agent.as_deref() == Some("TestBot/1.0")
            })
            .times(1)
            .returning(|_, metadata, now| {
                Ok(RecordedClick {
                    click: ClickEvent::from_metadata(metadata, now),
                    click_count: 1,
                })
            });

        let mut events = MockEventSink::new();
        events
            .expect_emit()
            .withf(|event| matches!(event, RegistryEvent::Accessed { click_count: 1, .. }))
            .times(1)
            .return_const(());

        let registry = registry(links, stats, clock, Arc::new(events));

        let metadata = ClickMetadata::new(None, Some("TestBot/1.0"), None, None);
        let url = registry.resolve("abc123", metadata).unwrap();

        assert_eq!(url, "https://example.com/page");
    }

    #[test]
    fn test_resolve_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_shortcode().times(1).returning(|_| None);

        let mut stats = MockStatsRepository::new();
        stats.expect_record_click().times(0);

        let registry = registry(
            links,
            stats,
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        let result = registry.resolve("missing", ClickMetadata::default());

        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }

    #[test]
    fn test_resolve_expired_refuses_without_click() {
        let clock = Arc::new(ManualClock::default());
        let record = live_record("old1", "https://example.com", &clock);
        clock.advance(Duration::seconds(61));

        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_shortcode()
            .times(1)
            .returning(move |_| Some(record.clone()));

        let mut stats = MockStatsRepository::new();
        stats.expect_record_click().times(0);

        let mut events = MockEventSink::new();
        events
            .expect_emit()
            .withf(|event| matches!(event, RegistryEvent::RedirectRefused { .. }))
            .times(1)
            .return_const(());

        let registry = registry(links, stats, clock, Arc::new(events));

        let result = registry.resolve("old1", ClickMetadata::default());

        assert!(matches!(result, Err(RegistryError::Expired { ref shortcode, .. }) if shortcode == "old1"));
    }

    #[test]
    fn test_resolve_at_exact_expiry_still_redirects() {
        let clock = Arc::new(ManualClock::default());
        let record = live_record("edge1", "https://example.com", &clock);
        clock.advance(Duration::minutes(1));

        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_shortcode()
            .returning(move |_| Some(record.clone()));

        let mut stats = MockStatsRepository::new();
        stats.expect_record_click().times(1).returning(|_, metadata, now| {
            Ok(RecordedClick {
                click: ClickEvent::from_metadata(metadata, now),
                click_count: 1,
            })
        });

        let registry = registry(links, stats, clock, Arc::new(NullEventSink));

        assert!(registry.resolve("edge1", ClickMetadata::default()).is_ok());
    }

    #[test]
    fn test_resolve_swallows_click_recording_failure() {
        let clock = Arc::new(ManualClock::default());
        let record = live_record("flaky1", "https://example.com/ok", &clock);

        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_shortcode()
            .times(1)
            .returning(move |_| Some(record.clone()));

        let mut stats = MockStatsRepository::new();
        stats
            .expect_record_click()
            .times(1)
            .returning(|code, _, _| Err(RegistryError::not_found(code)));

        let mut events = MockEventSink::new();
        events
            .expect_emit()
            .withf(|event| matches!(event, RegistryEvent::ClickRecordingFailed { shortcode, .. } if shortcode == "flaky1"))
            .times(1)
            .return_const(());

        let registry = registry(links, stats, clock, Arc::new(events));

        let url = registry.resolve("flaky1", ClickMetadata::default()).unwrap();

        assert_eq!(url, "https://example.com/ok");
    }

    #[test]
    fn test_exists_has_no_side_effects() {
        let mut links = MockLinkRepository::new();
        links
            .expect_exists()
            .withf(|code| code == "abc123")
            .times(1)
            .return_const(true);
        links.expect_insert().times(0);
        links.expect_find_by_shortcode().times(0);

        let mut events = MockEventSink::new();
        events.expect_emit().times(0);

        let registry = registry(
            links,
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(events),
        );

        assert!(registry.exists("abc123"));
    }

    #[test]
    fn test_short_link_trims_trailing_slash() {
        let registry = registry(
            MockLinkRepository::new(),
            MockStatsRepository::new(),
            Arc::new(ManualClock::default()),
            Arc::new(NullEventSink),
        );

        assert_eq!(registry.short_link("xyz"), "http://localhost:3001/xyz");
    }
}
