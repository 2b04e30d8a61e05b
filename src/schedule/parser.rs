//! Walks the day sections of the schedule page and collects the matches of
//! interest per day.

use chrono::NaiveDate;
use scraper::Html;
use tracing::{debug, warn};

use crate::constants::selectors;
use crate::schedule::document::HtmlNode;
use crate::schedule::extractor::{LeagueFilter, extract_match};
use crate::schedule::models::{Match, Schedule};

/// Swedish name for an English weekday name. Unknown names map to an empty string.
pub fn localized_weekday(english: &str) -> &'static str {
    match english {
        "Monday" => "Måndag",
        "Tuesday" => "Tisdag",
        "Wednesday" => "Onsdag",
        "Thursday" => "Torsdag",
        "Friday" => "Fredag",
        "Saturday" => "Lördag",
        "Sunday" => "Söndag",
        _ => "",
    }
}

/// Date used for day headers whose id cannot be parsed (`0001-01-01`).
fn fallback_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
}

/// Builds the `YYYY-MM-DD - Weekday` label for a day.
pub fn day_label(date: NaiveDate) -> String {
    let weekday = date.format("%A").to_string();
    format!(
        "{} - {}",
        date.format("%Y-%m-%d"),
        localized_weekday(&weekday)
    )
}

/// Parses the date out of a day header id such as `match-day-2024-01-01`.
///
/// A malformed id is not fatal: the day is kept under the fallback date.
pub fn day_label_from_id(id: &str) -> String {
    let raw = id.replace(selectors::DAY_ID_PREFIX, "");
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").unwrap_or_else(|e| {
        warn!("Malformed day header id {id:?}: {e}");
        fallback_date()
    });
    day_label(date)
}

fn parse_day<N: HtmlNode>(header: &N, filter: &LeagueFilter) -> (String, Vec<Match>) {
    let id = header
        .select_first(selectors::DAY_HEADER_INNER)
        .and_then(|inner| inner.attribute("id"))
        .unwrap_or_default();
    let label = day_label_from_id(&id);

    // The match table directly follows its day header
    let matches: Vec<Match> = header
        .next_element_sibling()
        .map(|table| {
            table
                .select_all(selectors::FOOTBALL_ROW)
                .iter()
                .filter_map(|row| extract_match(row, filter))
                .collect()
        })
        .unwrap_or_default();

    debug!("Parsed day {label}: {} matches of interest", matches.len());
    (label, matches)
}

/// Collects the first `days_to_show` days below `root`.
///
/// Days without any match of interest are kept with an empty list. If two
/// headers produce the same label, the later one wins.
pub fn parse_schedule<N: HtmlNode>(
    root: &N,
    days_to_show: usize,
    filter: &LeagueFilter,
) -> Schedule {
    let mut schedule = Schedule::new();

    for header in root
        .select_all(selectors::DAY_HEADER)
        .iter()
        .take(days_to_show)
    {
        let (label, matches) = parse_day(header, filter);
        schedule.insert(label, matches);
    }

    schedule
}

/// Parses a full schedule page.
pub fn parse_schedule_html(html: &str, days_to_show: usize, filter: &LeagueFilter) -> Schedule {
    let document = Html::parse_document(html);
    parse_schedule(&document.root_element(), days_to_show, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::models::match_count;
    use crate::testing_utils::TestPageBuilder;

    fn premier_league() -> LeagueFilter {
        LeagueFilter::new(["Premier League"])
    }

    #[test]
    fn test_weekday_label() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(day_label(date), "2024-01-01 - Måndag");
        assert_eq!(day_label_from_id("match-day-2024-01-01"), "2024-01-01 - Måndag");
        assert_eq!(day_label_from_id("match-day-2024-01-06"), "2024-01-06 - Lördag");
        assert_eq!(day_label_from_id("match-day-2024-01-07"), "2024-01-07 - Söndag");
    }

    #[test]
    fn test_localized_weekday_unknown_name_is_empty() {
        assert_eq!(localized_weekday("Wednesday"), "Onsdag");
        assert_eq!(localized_weekday("Funday"), "");
        assert_eq!(localized_weekday("monday"), "");
    }

    #[test]
    fn test_malformed_day_id_uses_fallback_date() {
        assert_eq!(day_label_from_id("match-day-tomorrow"), "0001-01-01 - Måndag");
        assert_eq!(day_label_from_id(""), "0001-01-01 - Måndag");
    }

    #[test]
    fn test_parse_schedule_groups_rows_by_day() {
        let html = TestPageBuilder::new()
            .day("2024-01-01")
            .football("Arsenal - Chelsea", "Premier League", Some("Viasat Fotboll"), "13:30")
            .football("PSG - Lyon", "Ligue 1", Some("C More"), "21:00")
            .day("2024-01-02")
            .football("Liverpool - Everton", "Premier League <a>Omgång 20</a>", None, "20:45")
            .other_sport("hockey", "Frölunda - Luleå", "SHL")
            .build();

        let schedule = parse_schedule_html(&html, 10, &premier_league());

        assert_eq!(schedule.len(), 2);
        let monday = &schedule["2024-01-01 - Måndag"];
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].name, "Arsenal - Chelsea");
        assert_eq!(monday[0].channel, "Viasat Fotboll");

        let tuesday = &schedule["2024-01-02 - Tisdag"];
        assert_eq!(tuesday.len(), 1);
        assert_eq!(tuesday[0].league, "Premier League");
        assert_eq!(tuesday[0].channel, "");
        assert_eq!(tuesday[0].time, "20:45");
    }

    #[test]
    fn test_day_without_interesting_matches_is_kept_empty() {
        let html = TestPageBuilder::new()
            .day("2024-01-03")
            .football("PSG - Lyon", "Ligue 1", Some("C More"), "21:00")
            .build();

        let schedule = parse_schedule_html(&html, 10, &premier_league());
        assert_eq!(schedule.get("2024-01-03 - Onsdag"), Some(&vec![]));
    }

    #[test]
    fn test_only_first_days_are_kept() {
        let mut builder = TestPageBuilder::new();
        for day in 1..=14 {
            builder = builder
                .day(&format!("2024-01-{day:02}"))
                .football("Arsenal - Chelsea", "Premier League", None, "13:30");
        }
        let html = builder.build();

        let schedule = parse_schedule_html(&html, 10, &premier_league());
        assert_eq!(schedule.len(), 10);
        assert!(schedule.keys().all(|label| label.as_str() < "2024-01-11"));
        assert_eq!(match_count(&schedule), 10);

        let three = parse_schedule_html(&html, 3, &premier_league());
        let keys: Vec<_> = three.keys().map(|k| &k[..10]).collect();
        assert_eq!(keys, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_duplicate_labels_keep_later_day() {
        let html = TestPageBuilder::new()
            .day("2024-01-01")
            .football("First - Game", "Premier League", None, "12:00")
            .day("2024-01-01")
            .football("Second - Game", "Premier League", None, "18:00")
            .build();

        let schedule = parse_schedule_html(&html, 10, &premier_league());
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule["2024-01-01 - Måndag"][0].name, "Second - Game");
    }

    #[test]
    fn test_rows_of_other_days_are_not_mixed_in() {
        let html = TestPageBuilder::new()
            .day("2024-01-01")
            .day("2024-01-02")
            .football("Arsenal - Chelsea", "Premier League", None, "13:30")
            .build();

        let schedule = parse_schedule_html(&html, 10, &premier_league());
        assert!(schedule["2024-01-01 - Måndag"].is_empty());
        assert_eq!(schedule["2024-01-02 - Tisdag"].len(), 1);
    }

    #[test]
    fn test_page_without_days_is_empty_schedule() {
        let schedule = parse_schedule_html("<html><body><p>Underhåll</p></body></html>", 10, &premier_league());
        assert!(schedule.is_empty());
    }
}
