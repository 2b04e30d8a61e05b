//! Test utilities: a fixture page builder shaped like the tvmatchen.nu markup
//! and an in-memory fetcher that stands in for the network.

use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::error::AppError;
use crate::schedule::fetch::HtmlFetcher;

struct FixtureRow {
    sport: String,
    name: String,
    league_html: String,
    channel: Option<String>,
    time: String,
}

struct FixtureDay {
    id: String,
    rows: Vec<FixtureRow>,
}

/// Builds schedule pages for tests.
///
/// Rows are added to the most recently added day; rows added before any day
/// are ignored.
#[derive(Default)]
pub struct TestPageBuilder {
    days: Vec<FixtureDay>,
}

impl TestPageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a day header for an ISO date (`YYYY-MM-DD`)
    pub fn day(self, date: &str) -> Self {
        self.day_with_id(&format!("match-day-{date}"))
    }

    /// Adds a day header with an arbitrary inner id
    pub fn day_with_id(mut self, id: &str) -> Self {
        self.days.push(FixtureDay {
            id: id.to_string(),
            rows: Vec::new(),
        });
        self
    }

    /// Adds a football row. `league_html` is inserted verbatim so tests can
    /// include sub-links.
    pub fn football(self, name: &str, league_html: &str, channel: Option<&str>, time: &str) -> Self {
        self.row("fotboll", name, league_html, channel, time)
    }

    /// Adds a row for another sport
    pub fn other_sport(self, sport: &str, name: &str, league_html: &str) -> Self {
        self.row(sport, name, league_html, Some("TV4"), "19:00")
    }

    fn row(
        mut self,
        sport: &str,
        name: &str,
        league_html: &str,
        channel: Option<&str>,
        time: &str,
    ) -> Self {
        if let Some(day) = self.days.last_mut() {
            day.rows.push(FixtureRow {
                sport: sport.to_string(),
                name: name.to_string(),
                league_html: league_html.to_string(),
                channel: channel.map(String::from),
                time: time.to_string(),
            });
        }
        self
    }

    pub fn build(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html><head><title>TV-matchen</title></head><body>\n<div class=\"view-content\">\n",
        );

        for day in &self.days {
            html.push_str(&format!(
                "<h2 class=\"day-name\"><span class=\"day-name-inner\" id=\"{}\">Dag</span></h2>\n",
                day.id
            ));
            html.push_str("<table class=\"views-table\"><tbody>\n");
            for row in &day.rows {
                let channel = row
                    .channel
                    .as_ref()
                    .map(|title| format!("<span class=\"channel-item\" title=\"{title}\"></span>"))
                    .unwrap_or_default();
                html.push_str(&format!(
                    "<tr class=\"sport-name-{}\">\n  <td class=\"time\"><span class=\"field-content\">{}</span></td>\n  <td class=\"match-name\">{}</td>\n  <td class=\"league\">\n    {}\n  </td>\n  <td class=\"channel\">{}</td>\n</tr>\n",
                    row.sport, row.time, row.name, row.league_html, channel
                ));
            }
            html.push_str("</tbody></table>\n");
        }

        html.push_str("</div>\n</body></html>\n");
        html
    }
}

/// In-memory [`HtmlFetcher`] that serves a fixed body (or a fixed failure)
/// and counts how often it was asked.
pub struct StaticFetcher {
    response: Mutex<Result<String, String>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl StaticFetcher {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            response: Mutex::new(Ok(body.into())),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// A fetcher whose every call fails with a connection error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Mutex::new(Err(message.into())),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Delays every response, to keep a refresh in flight while other tasks run
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_body(&self, body: impl Into<String>) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) = Ok(body.into());
    }

    pub fn set_failure(&self, message: impl Into<String>) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) = Err(message.into());
    }

    /// Number of fetches performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HtmlFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let response = self
            .response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match response {
            Ok(body) => Ok(Bytes::from(body)),
            Err(message) => Err(AppError::network_connection(url, message)),
        }
    }
}
