//! Time-bounded in-memory cache of the scraped schedule.
//!
//! The cache holds exactly one snapshot. A snapshot is built completely
//! before it is published, so readers always see either the previous or the
//! new schedule, never a half-filled one.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::schedule::extractor::LeagueFilter;
use crate::schedule::fetch::HtmlFetcher;
use crate::schedule::models::{Schedule, match_count};
use crate::schedule::parser::parse_schedule_html;

/// What the cache scrapes and how long it keeps it.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub source_url: String,
    pub ttl: Duration,
    pub days_to_show: usize,
    pub filter: LeagueFilter,
}

impl CacheSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_url: config.source_url.clone(),
            ttl: config.cache_ttl(),
            days_to_show: config.days_to_show,
            filter: LeagueFilter::new(config.leagues.iter().cloned()),
        }
    }
}

/// A published schedule as handed to callers.
#[derive(Debug, Clone)]
pub struct ScheduleSnapshot {
    pub schedule: Arc<Schedule>,
    /// Time of the last successful refresh, `None` if there never was one.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Set when a refresh was attempted for this request and failed, in which
    /// case `schedule` is the previous good snapshot.
    pub refresh_error: Option<String>,
}

#[derive(Debug, Default)]
struct CacheState {
    schedule: Arc<Schedule>,
    refreshed_at: Option<DateTime<Utc>>,
    /// Error of the most recent refresh attempt, `None` if it succeeded.
    last_error: Option<String>,
}

impl CacheState {
    fn is_stale_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let Some(refreshed_at) = self.refreshed_at else {
            return true;
        };

        // A clock that went backwards counts as zero elapsed time
        let elapsed = (now - refreshed_at).to_std().unwrap_or_default();
        elapsed >= ttl
    }

    fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot {
            schedule: Arc::clone(&self.schedule),
            refreshed_at: self.refreshed_at,
            refresh_error: None,
        }
    }

    /// What a request gets when a refresh attempt failed with `message`:
    /// the previous snapshot flagged with the error, or the error itself when
    /// nothing was ever cached.
    fn fallback(&self, message: &str) -> Option<ScheduleSnapshot> {
        self.refreshed_at?;

        warn!(
            "Schedule refresh failed, serving snapshot from {:?}: {message}",
            self.refreshed_at
        );
        let mut snapshot = self.snapshot();
        snapshot.refresh_error = Some(message.to_string());
        Some(snapshot)
    }

    /// Outcome of the latest attempt, for requests that waited on it.
    fn last_outcome(&self) -> Result<ScheduleSnapshot, AppError> {
        match &self.last_error {
            None => Ok(self.snapshot()),
            Some(message) => self
                .fallback(message)
                .ok_or_else(|| AppError::refresh_failed(message.clone())),
        }
    }
}

/// Schedule cache shared by all request handlers.
///
/// A refresh holds the write lock for the whole fetch, parse and publish, so
/// concurrent refreshes are serialized and readers wait for it to finish.
/// Requests that arrive while an attempt is in flight share its outcome,
/// success or failure, instead of fetching again.
pub struct ScheduleCache<F> {
    fetcher: F,
    settings: CacheSettings,
    state: RwLock<CacheState>,
    /// Number of finished refresh attempts. Only changed under the write lock.
    attempts: AtomicU64,
}

impl<F: HtmlFetcher> ScheduleCache<F> {
    /// Creates an empty cache. The first `get_schedule` call fetches.
    pub fn new(fetcher: F, settings: CacheSettings) -> Self {
        Self {
            fetcher,
            settings,
            state: RwLock::new(CacheState::default()),
            attempts: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Current snapshot without triggering a refresh.
    pub async fn snapshot(&self) -> ScheduleSnapshot {
        self.state.read().await.snapshot()
    }

    /// True if the next `get_schedule` call would refresh.
    pub async fn is_stale(&self) -> bool {
        self.state
            .read()
            .await
            .is_stale_at(Utc::now(), self.settings.ttl)
    }

    /// Returns the schedule, refreshing it first if it is older than the TTL.
    ///
    /// When the refresh fails but an earlier refresh succeeded, the earlier
    /// snapshot is returned with `refresh_error` set. Only a failure with
    /// nothing cached is returned as an error.
    ///
    /// At most one fetch is made per wave of concurrent requests: a request
    /// that finds an attempt finished since it arrived reuses that outcome.
    #[instrument(skip(self))]
    pub async fn get_schedule(&self) -> Result<ScheduleSnapshot, AppError> {
        // Taken before any lock, so an attempt in flight on arrival counts as newer
        let seen_attempts = self.attempts.load(Ordering::Acquire);

        {
            let state = self.state.read().await;
            if !state.is_stale_at(Utc::now(), self.settings.ttl) {
                debug!("Serving cached schedule from {:?}", state.refreshed_at);
                return Ok(state.snapshot());
            }
        }

        let mut state = self.state.write().await;

        // Another request may have refreshed while this one waited for the lock
        if !state.is_stale_at(Utc::now(), self.settings.ttl) {
            debug!("Schedule was refreshed while waiting for the lock");
            return Ok(state.snapshot());
        }

        if self.attempts.load(Ordering::Acquire) != seen_attempts {
            debug!("Reusing the outcome of a refresh that finished while waiting");
            return state.last_outcome();
        }

        match self.refresh_locked(&mut state).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => state.fallback(&e.to_string()).ok_or(e),
        }
    }

    /// Refreshes unconditionally and returns the new snapshot.
    ///
    /// On failure the previous snapshot stays in place and the error is returned.
    #[instrument(skip(self))]
    pub async fn force_refresh(&self) -> Result<ScheduleSnapshot, AppError> {
        let mut state = self.state.write().await;
        self.refresh_locked(&mut state).await
    }

    async fn refresh_locked(&self, state: &mut CacheState) -> Result<ScheduleSnapshot, AppError> {
        let result = self.fetch_and_parse().await;
        self.attempts.fetch_add(1, Ordering::AcqRel);

        match result {
            Ok(schedule) => {
                state.schedule = Arc::new(schedule);
                state.refreshed_at = Some(Utc::now());
                state.last_error = None;
                Ok(state.snapshot())
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_and_parse(&self) -> Result<Schedule, AppError> {
        let url = &self.settings.source_url;
        info!("Refreshing schedule from {url}");

        let body = self.fetcher.fetch(url).await?;
        let html = String::from_utf8_lossy(&body);
        if html.trim().is_empty() {
            return Err(AppError::empty_document("Response body is empty", url));
        }

        let schedule = parse_schedule_html(&html, self.settings.days_to_show, &self.settings.filter);

        info!(
            "Schedule refreshed: {} days, {} matches",
            schedule.len(),
            match_count(&schedule)
        );
        Ok(schedule)
    }
}
