//! Scraping the TV schedule page and caching the result.
//!
//! Leaf first: [`normalize`] cleans scraped text, [`extractor`] turns one
//! table row into a [`Match`], [`parser`] walks the day sections of a page,
//! and [`cache`] fetches, parses and publishes snapshots.

pub mod cache;
pub mod document;
pub mod extractor;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod parser;

pub use cache::{CacheSettings, ScheduleCache, ScheduleSnapshot};
pub use document::HtmlNode;
pub use extractor::{LeagueFilter, extract_match};
pub use fetch::{HtmlFetcher, HttpFetcher};
pub use models::{Match, Schedule};
pub use normalize::normalize_text;
pub use parser::{parse_schedule, parse_schedule_html};
