//! Core domain entities of the shortcode registry.
//!
//! Entities are plain data structures. Creation inputs use separate structs
//! (`NewShortcodeRecord`, `ClickMetadata`), as stored values get fields the
//! store assigns itself.
//!
//! # Entity Types
//!
//! - [`ShortcodeRecord`] - A shortcode mapped to an original URL
//! - [`ClickEvent`] - A single recorded redirect
//! - [`StatisticsEntry`] / [`LinkSummary`] - Read models over a record and its clicks

pub mod click;
pub mod shortcode_record;
pub mod statistics;

pub use click::{ClickEvent, ClickMetadata, DIRECT_SOURCE};
pub use shortcode_record::{NewShortcodeRecord, ShortcodeRecord};
pub use statistics::{LinkSummary, StatisticsEntry};
