//! Football on Swedish TV
//!
//! This library scrapes the tvmatchen.nu broadcast schedule, keeps the
//! football matches of selected leagues in a time-bounded in-memory cache and
//! serves them as JSON and HTML.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fotboll_tv::config::Config;
//! use fotboll_tv::error::AppError;
//! use fotboll_tv::schedule::{CacheSettings, HttpFetcher, ScheduleCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::default();
//!     let fetcher = HttpFetcher::with_timeout(config.http_timeout_seconds)?;
//!     let cache = ScheduleCache::new(fetcher, CacheSettings::from_config(&config));
//!
//!     let snapshot = cache.get_schedule().await?;
//!     for (day, matches) in snapshot.schedule.iter() {
//!         println!("{day}");
//!         for game in matches {
//!             println!("{game}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod schedule;
pub mod server;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use schedule::{Match, Schedule, ScheduleCache, ScheduleSnapshot};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
