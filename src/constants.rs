//! Application-wide constants and configuration defaults
//!
//! This module centralizes the magic numbers, selectors and default values
//! so the scraper and the server agree on them.

/// Page that lists the upcoming TV broadcasts
pub const DEFAULT_SOURCE_URL: &str = "http://www.tvmatchen.nu/";

/// Number of day sections kept from the source page
pub const DEFAULT_DAYS_TO_SHOW: usize = 10;

/// How long a scraped schedule is served before it is considered stale
pub const DEFAULT_CACHE_TTL_HOURS: u64 = 10;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Address the HTTP server binds to unless configured otherwise
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Leagues shown unless configured otherwise
pub const DEFAULT_LEAGUES: &[&str] = &["Premier League"];

/// Name of the log file inside the log directory
pub const LOG_FILE_NAME: &str = "fotboll_tv.log";

/// Environment variable names that override config file values
pub mod env_vars {
    pub const SOURCE_URL: &str = "FOTBOLL_TV_SOURCE_URL";
    pub const LEAGUES: &str = "FOTBOLL_TV_LEAGUES";
    pub const CACHE_TTL_HOURS: &str = "FOTBOLL_TV_CACHE_TTL_HOURS";
    pub const HTTP_TIMEOUT: &str = "FOTBOLL_TV_HTTP_TIMEOUT";
    pub const BIND_ADDRESS: &str = "FOTBOLL_TV_BIND";
    pub const LOG_FILE: &str = "FOTBOLL_TV_LOG_FILE";
}

/// CSS selectors describing the tvmatchen.nu markup
pub mod selectors {
    /// Day header, one per broadcast day
    pub const DAY_HEADER: &str = "h2.day-name";

    /// Element inside the day header whose id embeds the ISO date
    pub const DAY_HEADER_INNER: &str = "span.day-name-inner";

    /// Prefix of the day header id, followed by `YYYY-MM-DD`
    pub const DAY_ID_PREFIX: &str = "match-day-";

    /// A football row inside the day's match table
    pub const FOOTBALL_ROW: &str = ".sport-name-fotboll";

    pub const MATCH_NAME: &str = ".match-name";
    pub const LEAGUE: &str = ".league";

    /// Sub-links inside the league cell (round numbers, groups) that are stripped
    pub const LEAGUE_LINK: &str = "a";

    pub const CHANNEL_ITEM: &str = ".channel .channel-item";
    pub const CHANNEL_TITLE_ATTR: &str = "title";
    pub const TIME: &str = ".time .field-content";
}
