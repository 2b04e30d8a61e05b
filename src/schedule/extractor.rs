//! Turns one football row of the schedule table into a [`Match`].

use tracing::trace;

use crate::constants::selectors;
use crate::schedule::document::HtmlNode;
use crate::schedule::models::Match;
use crate::schedule::normalize::normalize_text;

/// The set of league name fragments a row must mention to be kept.
///
/// Matching is case-sensitive and substring based, so `"Premier League"`
/// also keeps `"Premier League 2"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueFilter {
    leagues: Vec<String>,
}

impl LeagueFilter {
    pub fn new<I, S>(leagues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            leagues: leagues
                .into_iter()
                .map(Into::into)
                .filter(|league: &String| !league.is_empty())
                .collect(),
        }
    }

    pub fn leagues(&self) -> &[String] {
        &self.leagues
    }

    /// True if `league` contains any configured fragment.
    pub fn is_interesting(&self, league: &str) -> bool {
        self.leagues.iter().any(|l| league.contains(l.as_str()))
    }
}

/// Text of every descendant matching `css`, concatenated in document order.
/// Empty if there is none.
fn joined_text<N: HtmlNode>(row: &N, css: &str) -> String {
    row.select_all(css).iter().map(HtmlNode::text_content).collect()
}

/// League cell text with the round/group sub-links removed and whitespace
/// normalized.
///
/// A row with several league cells yields their texts joined, with the links
/// of all of them removed.
pub fn extract_league<N: HtmlNode>(row: &N) -> String {
    let cells = row.select_all(selectors::LEAGUE);
    let mut league: String = cells.iter().map(HtmlNode::text_content).collect();

    for link in cells
        .iter()
        .flat_map(|cell| cell.select_all(selectors::LEAGUE_LINK))
    {
        let label = link.text_content();
        if !label.is_empty() {
            league = league.replace(&label, "");
        }
    }

    normalize_text(&league)
}

/// Extracts a match from a football row.
///
/// Returns `None` when the row's league is not of interest. Missing cells
/// produce empty fields instead of failing.
pub fn extract_match<N: HtmlNode>(row: &N, filter: &LeagueFilter) -> Option<Match> {
    let name = joined_text(row, selectors::MATCH_NAME);
    let league = extract_league(row);

    if !filter.is_interesting(&league) {
        trace!("Skipping row in league {league:?}: {name:?}");
        return None;
    }

    let channel = row
        .select_first(selectors::CHANNEL_ITEM)
        .and_then(|item| item.attribute(selectors::CHANNEL_TITLE_ATTR))
        .unwrap_or_default();

    let time = joined_text(row, selectors::TIME);

    Some(Match {
        name,
        league,
        channel,
        time,
    })
}
